//! File Module
//!
//! The file-backed storage engine: one flat file per key.
//!
//! ## Responsibilities
//! - Map keys to `root/namespace/key`
//! - Encode scalars, lists and sets into plain file contents
//! - Rewrite whole files on every mutation
//! - Enforce mode and ownership after every write
//!
//! ## On-Disk Layout
//! ```text
//! {root}/
//!   └── {namespace}/        (0755)
//!         ├── port          "8080"            scalar: raw contents
//!         ├── hosts         "a\nb\na\n"       list: one element per line
//!         └── tags          "blue\nred\n"     set: one member per line
//! ```
//!
//! The format carries no type tag: whichever store reads a key decides how
//! it is decoded. Callers must not use one key as both a list and a set.
//!
//! ## Write Path
//! Every rewrite goes to a temporary file in the namespace directory which
//! is then renamed over the key, so an interrupted write leaves the previous
//! contents in place. There is no locking; concurrent writers to one key
//! race and the last rename wins.

mod keys;
mod list;
mod scalar;
pub mod sequence;
mod set;

pub use keys::{namespace_path, validate_segment, KeyCodec};

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::Builder;

use crate::backend::{Backend, DataType, Property, PropertyCollection, PropertyValue, ScalarStore};
use crate::config::Config;
use crate::error::{PropError, Result};
use crate::permissions::{IdentityResolver, PermissionEnforcer};

/// Prefix of in-flight rewrite files; never listed as keys
pub(crate) const REWRITE_PREFIX: &str = ".prop-rewrite-";

/// File-backed engine for one namespace
#[derive(Debug)]
pub struct FileBackend {
    /// Engine configuration
    config: Config,

    /// Key → path mapping for the configured namespace
    keys: KeyCodec,

    /// Mode/ownership applied after writes
    permissions: PermissionEnforcer,
}

impl FileBackend {
    /// Open an engine for `config.namespace` under `config.root`
    ///
    /// Nothing is created on disk until the first write.
    pub fn open(config: Config, identity: Arc<dyn IdentityResolver>) -> Result<Self> {
        let keys = KeyCodec::new(&config.root, &config.namespace)?;
        let permissions = PermissionEnforcer::new(&config, identity);

        tracing::debug!(
            root = %config.root.display(),
            namespace = %config.namespace,
            "opened file backend"
        );

        Ok(Self {
            config,
            keys,
            permissions,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn namespace(&self) -> &str {
        self.keys.namespace()
    }

    pub fn namespace_dir(&self) -> &Path {
        self.keys.namespace_dir()
    }

    /// File path that stores `key`
    pub fn key_path(&self, key: &str) -> Result<PathBuf> {
        self.keys.path(key)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Create the namespace directory if needed and apply its permissions
    fn ensure_namespace(&self) -> Result<()> {
        let dir = self.keys.namespace_dir();
        fs::create_dir_all(dir)?;
        self.permissions.apply_to_dir(dir)
    }

    /// Ensure `key` has a file, creating an empty one if absent
    fn touch(&self, key: &str) -> Result<PathBuf> {
        let path = self.keys.path(key)?;
        if self.keys.exists(key)? {
            return Ok(path);
        }

        self.ensure_namespace()?;
        OpenOptions::new().write(true).create(true).open(&path)?;
        self.permissions.apply_to_file(&path)?;

        tracing::debug!(key = %self.keys.label(key), "created key");
        Ok(path)
    }

    /// Replace the contents of `path` with `contents`
    fn rewrite(&self, path: &Path, contents: &str) -> Result<()> {
        // Step 1: Write the new contents next to the key
        let mut staged = Builder::new()
            .prefix(REWRITE_PREFIX)
            .tempfile_in(self.keys.namespace_dir())?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_data()?;

        // Step 2: Swap it in
        staged.persist(path).map_err(|e| e.error)?;

        // Step 3: Mode and ownership
        self.permissions.apply_to_file(path)
    }

    /// Read the file of `key` as text; non-UTF-8 contents are `InvalidValue`
    fn read_text(&self, key: &str, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|_| {
            PropError::InvalidValue(format!("key {} does not hold UTF-8 text", self.keys.label(key)))
        })
    }

    /// Names of every key file in `dir`, sorted; a missing directory has none
    fn key_names(dir: &Path) -> Result<Vec<String>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) if name.starts_with(REWRITE_PREFIX) => continue,
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(name = ?raw, "skipping non-UTF-8 key file"),
            }
        }

        names.sort();
        Ok(names)
    }

    /// Remove every key file in `dir`, keeping the directory itself
    fn remove_keys(dir: &Path) -> Result<usize> {
        let mut removed = 0;
        for name in Self::key_names(dir)? {
            match fs::remove_file(dir.join(&name)) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

/// Decode newline-delimited contents into lines
fn decode_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents.lines().map(str::to_string)
}

/// List elements and set members are stored one per line, so they cannot
/// contain a line break
fn validate_element(element: &str) -> Result<()> {
    if element.contains(|c| c == '\n' || c == '\r') {
        return Err(PropError::InvalidValue(format!(
            "element {:?} contains a line break",
            element
        )));
    }
    Ok(())
}

/// Encode lines, each terminated by a newline
fn encode_lines<'a>(lines: impl IntoIterator<Item = &'a String>) -> String {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    contents
}

// =============================================================================
// Namespace Administration
// =============================================================================

impl Backend for FileBackend {
    fn backend_export(&self) -> Result<PropertyCollection> {
        let mut collection = PropertyCollection::new();
        for (key, value) in self.get_all()? {
            collection.push(Property::string(self.namespace(), key, value));
        }

        tracing::info!(namespace = %self.namespace(), properties = collection.len(), "exported namespace");
        Ok(collection)
    }

    fn backend_import(&self, collection: &PropertyCollection, clear: bool) -> Result<()> {
        for property in collection.iter() {
            property.validate()?;
            self.keys.path(&property.key)?;
            if let PropertyValue::Elements(elements) = &property.value {
                elements.iter().try_for_each(|element| validate_element(element))?;
            }
        }

        if clear {
            self.backend_reset()?;
        }

        for property in collection.iter() {
            let contents = match (property.data_type, &property.value) {
                (_, PropertyValue::Scalar(value)) => value.clone(),
                (DataType::Set, PropertyValue::Elements(members)) => {
                    encode_lines(members.iter().collect::<BTreeSet<_>>())
                }
                (_, PropertyValue::Elements(elements)) => encode_lines(elements),
            };

            let path = self.touch(&property.key)?;
            self.rewrite(&path, &contents)?;
        }

        tracing::info!(
            namespace = %self.namespace(),
            properties = collection.len(),
            clear,
            "imported namespace"
        );
        Ok(())
    }

    fn backend_reset(&self) -> Result<()> {
        let removed = Self::remove_keys(self.keys.namespace_dir())?;
        tracing::info!(namespace = %self.namespace(), removed, "reset namespace");
        Ok(())
    }

    fn namespace_exists(&self, namespace: &str) -> Result<bool> {
        let dir = namespace_path(&self.config.root, namespace)?;
        match fs::metadata(&dir) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn namespace_clear(&self, namespace: &str) -> Result<()> {
        let dir = namespace_path(&self.config.root, namespace)?;
        let removed = Self::remove_keys(&dir)?;
        tracing::info!(namespace, removed, "cleared namespace");
        Ok(())
    }
}
