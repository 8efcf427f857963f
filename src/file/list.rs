//! List store
//!
//! A list is one file with one element per line. Every operation loads the
//! whole sequence, works on it in memory, and (for mutations) rewrites the
//! whole file.

use crate::backend::ListStore;
use crate::error::{PropError, Result};

use super::sequence::{self, removal_quota};
use super::{decode_lines, encode_lines, validate_element, FileBackend};

impl FileBackend {
    /// Load the list stored under `key`; a missing key is `NotFound`
    fn load_list(&self, key: &str) -> Result<Vec<String>> {
        let path = self.keys.path(key)?;
        if !self.keys.exists(key)? {
            return Err(PropError::NotFound(format!("key {}", self.keys.label(key))));
        }

        let contents = self.read_text(key, &path)?;
        Ok(decode_lines(&contents).collect())
    }

    fn store_list(&self, key: &str, elements: &[String]) -> Result<()> {
        let path = self.keys.path(key)?;
        self.rewrite(&path, &encode_lines(elements))
    }
}

impl ListStore for FileBackend {
    fn lindex(&self, key: &str, index: i64) -> Result<String> {
        let elements = self.load_list(key)?;

        usize::try_from(index)
            .ok()
            .and_then(|index| elements.into_iter().nth(index))
            .ok_or_else(|| {
                PropError::NotFound(format!("index {} in list {}", index, self.keys.label(key)))
            })
    }

    fn lismember(&self, key: &str, element: &str) -> Result<bool> {
        let elements = self.load_list(key)?;

        if elements.iter().any(|e| e == element) {
            Ok(true)
        } else {
            Err(PropError::NotFound(format!(
                "element {:?} in list {}",
                element,
                self.keys.label(key)
            )))
        }
    }

    fn llen(&self, key: &str) -> Result<usize> {
        Ok(self.load_list(key)?.len())
    }

    fn lrange(&self, key: &str) -> Result<Vec<String>> {
        self.load_list(key)
    }

    fn lrange_from(&self, key: &str, start: i64) -> Result<Vec<String>> {
        let elements = self.load_list(key)?;
        Ok(sequence::slice(elements, start, None))
    }

    fn lrange_from_to(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let elements = self.load_list(key)?;
        Ok(sequence::slice(elements, start, Some(stop)))
    }

    fn lrem(&self, key: &str, count: i64, element: &str) -> Result<usize> {
        let mut elements = self.load_list(key)?;

        let (direction, quota) = removal_quota(count);
        let removed = sequence::remove_matching(&mut elements, element, quota, direction);

        // Rewritten even when nothing matched
        self.store_list(key, &elements)?;

        tracing::debug!(key = %self.keys.label(key), count, removed, "lrem");
        Ok(removed)
    }

    fn lset(&self, key: &str, index: i64, element: &str) -> Result<()> {
        let element = element.trim();
        validate_element(element)?;

        self.touch(key)?;
        let mut elements = self.load_list(key)?;

        sequence::replace_at(&mut elements, index, element.to_string())?;
        self.store_list(key, &elements)?;

        tracing::debug!(key = %self.keys.label(key), index, "lset");
        Ok(())
    }

    fn rpush(&self, key: &str, new_elements: &[String]) -> Result<usize> {
        new_elements.iter().try_for_each(|element| validate_element(element))?;

        self.touch(key)?;
        let mut elements = self.load_list(key)?;

        elements.extend_from_slice(new_elements);
        self.store_list(key, &elements)?;

        tracing::debug!(key = %self.keys.label(key), pushed = new_elements.len(), len = elements.len(), "rpush");
        Ok(elements.len())
    }
}
