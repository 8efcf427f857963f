//! Key codec
//!
//! Maps `(root, namespace, key)` to `root/namespace/key`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PropError, Result};

use super::REWRITE_PREFIX;

/// Check that `name` can be used as a single path segment
pub fn validate_segment(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0');

    if valid {
        Ok(())
    } else {
        Err(PropError::InvalidName(name.to_string()))
    }
}

/// Directory of `namespace` under `root`
pub fn namespace_path(root: &Path, namespace: &str) -> Result<PathBuf> {
    validate_segment(namespace)?;
    Ok(root.join(namespace))
}

/// Resolves keys of one namespace to file paths
#[derive(Debug, Clone)]
pub struct KeyCodec {
    namespace: String,
    namespace_dir: PathBuf,
}

impl KeyCodec {
    pub fn new(root: &Path, namespace: &str) -> Result<Self> {
        Ok(Self {
            namespace: namespace.to_string(),
            namespace_dir: namespace_path(root, namespace)?,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_dir(&self) -> &Path {
        &self.namespace_dir
    }

    /// File path for `key`. Pure; touches nothing on disk.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        validate_segment(key)?;
        if key.starts_with(REWRITE_PREFIX) {
            return Err(PropError::InvalidName(key.to_string()));
        }
        Ok(self.namespace_dir.join(key))
    }

    /// Whether `key` has a file. Stat errors other than "not found" are
    /// reported, not folded into `false`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path(key)?;
        match fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Human-readable `namespace.key` label for error messages
    pub fn label(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }
}
