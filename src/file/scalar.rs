//! Scalar store: one raw string per key file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;

use crate::backend::ScalarStore;
use crate::error::{PropError, Result};

use super::FileBackend;

impl ScalarStore for FileBackend {
    fn get(&self, key: &str, default: &str) -> Result<String> {
        let path = self.keys.path(key)?;

        if !self.keys.exists(key)? {
            if !default.is_empty() {
                return Ok(default.to_string());
            }
            return Err(PropError::NotFound(format!("key {}", self.keys.label(key))));
        }

        self.read_text(key, &path)
    }

    fn get_all(&self) -> Result<BTreeMap<String, String>> {
        let dir = self.keys.namespace_dir();
        let mut values = BTreeMap::new();

        for name in Self::key_names(dir)? {
            let bytes = match fs::read(dir.join(&name)) {
                Ok(bytes) => bytes,
                // Deleted between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(key = %self.keys.label(&name), "key vanished during listing");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            match String::from_utf8(bytes) {
                Ok(value) => {
                    values.insert(name, value);
                }
                Err(_) => tracing::warn!(key = %self.keys.label(&name), "skipping key with non-UTF-8 contents"),
            }
        }

        Ok(values)
    }

    fn get_all_by_prefix(&self, prefix: &str) -> Result<BTreeMap<String, String>> {
        let mut values = self.get_all()?;
        values.retain(|key, _| key.starts_with(prefix));
        Ok(values)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.touch(key)?;
        self.rewrite(&path, value)?;

        tracing::debug!(key = %self.keys.label(key), bytes = value.len(), "set");
        Ok(())
    }

    fn del(&self, key: &str) -> Result<()> {
        let path = self.keys.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key = %self.keys.label(key), "deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool> {
        self.keys.exists(key)
    }
}
