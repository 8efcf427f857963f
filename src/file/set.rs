//! Set store
//!
//! A set is one file with one unique member per line. Members are written
//! in sorted order, but callers must treat the order as unspecified.

use std::collections::BTreeSet;

use crate::backend::SetStore;
use crate::error::{PropError, Result};

use super::{decode_lines, encode_lines, validate_element, FileBackend};

impl FileBackend {
    /// Load the set stored under `key`; a missing key is `NotFound`
    fn load_set(&self, key: &str) -> Result<BTreeSet<String>> {
        let path = self.keys.path(key)?;
        if !self.keys.exists(key)? {
            return Err(PropError::NotFound(format!("set {}", self.keys.label(key))));
        }

        let contents = self.read_text(key, &path)?;
        Ok(decode_lines(&contents).collect())
    }

    fn store_set(&self, key: &str, members: &BTreeSet<String>) -> Result<()> {
        let path = self.keys.path(key)?;
        self.rewrite(&path, &encode_lines(members))
    }
}

impl SetStore for FileBackend {
    fn sadd(&self, key: &str, new_members: &[String]) -> Result<usize> {
        new_members.iter().try_for_each(|member| validate_element(member))?;

        self.touch(key)?;
        let mut members = self.load_set(key)?;

        let added = new_members
            .iter()
            .filter(|member| members.insert((*member).clone()))
            .count();
        self.store_set(key, &members)?;

        tracing::debug!(key = %self.keys.label(key), added, "sadd");
        Ok(added)
    }

    fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        Ok(self.load_set(key)?.contains(member))
    }

    fn smembers(&self, key: &str) -> Result<BTreeSet<String>> {
        self.load_set(key)
    }

    fn srem(&self, key: &str, old_members: &[String]) -> Result<usize> {
        let mut members = self.load_set(key)?;

        let removed = old_members
            .iter()
            .filter(|member| members.remove(member.as_str()))
            .count();
        self.store_set(key, &members)?;

        tracing::debug!(key = %self.keys.label(key), removed, "srem");
        Ok(removed)
    }
}
