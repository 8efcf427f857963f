//! Configuration for prop
//!
//! Centralized configuration with sensible defaults, plus parsing of the
//! URL-like backend selection string.

use std::path::PathBuf;

use url::Url;

use crate::error::{PropError, Result};

/// Namespace used when neither the caller nor the URL names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Storage root used when nothing else is configured
pub const DEFAULT_ROOT: &str = "/var/lib/prop/data";

/// Backend URL used by the CLI when `--url` is not given
pub const DEFAULT_URL: &str = "file:/var/lib/prop/data?system-user=root&system-group=root";

/// Configuration for a file-backed property store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory holding one directory per namespace
    /// Internal structure:
    ///   {root}/
    ///     └── {namespace}/
    ///           ├── key-a      (one file per key)
    ///           └── key-b
    pub root: PathBuf,

    /// Namespace this store reads and writes
    pub namespace: String,

    // -------------------------------------------------------------------------
    // Permission Configuration
    // -------------------------------------------------------------------------
    /// System user that should own every written file
    pub system_user: Option<String>,

    /// System group that should own every written file
    pub system_group: Option<String>,

    /// Mode bits for the namespace directory
    pub dir_mode: u32,

    /// Mode bits for key files
    pub file_mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            namespace: DEFAULT_NAMESPACE.to_string(),
            system_user: None,
            system_group: None,
            dir_mode: 0o755,
            file_mode: 0o600,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from a `file:` URL
    ///
    /// Recognized query parameters: `namespace`, `system-user`,
    /// `system-group`. A non-empty `namespace_override` wins over the
    /// `namespace` parameter.
    pub fn from_url(url: &Url, namespace_override: &str) -> Result<Self> {
        if url.scheme() != "file" {
            return Err(PropError::Config(format!(
                "Unsupported scheme for file backend: {}",
                url.scheme()
            )));
        }

        let root = url
            .to_file_path()
            .map_err(|_| PropError::Config(format!("Invalid storage root in url: {}", url)))?;

        let mut builder = Config::builder().root(root);
        let mut namespace = None;

        for (name, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match name.as_ref() {
                "namespace" => namespace = Some(value.into_owned()),
                "system-user" => builder = builder.system_user(value.into_owned()),
                "system-group" => builder = builder.system_group(value.into_owned()),
                other => tracing::debug!(parameter = other, "ignoring unknown url parameter"),
            }
        }

        if !namespace_override.is_empty() {
            namespace = Some(namespace_override.to_string());
        }

        if let Some(namespace) = namespace {
            builder = builder.namespace(namespace);
        }

        Ok(builder.build())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage root
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root = path.into();
        self
    }

    /// Set the namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set the owning system user
    pub fn system_user(mut self, user: impl Into<String>) -> Self {
        self.config.system_user = Some(user.into());
        self
    }

    /// Set the owning system group
    pub fn system_group(mut self, group: impl Into<String>) -> Self {
        self.config.system_group = Some(group.into());
        self
    }

    /// Set the namespace directory mode
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self
    }

    /// Set the key file mode
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
