//! Fallback engine used when no real backend is configured.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PropError, Result};

use super::{Backend, ListStore, PropertyCollection, ScalarStore, SetStore};

/// Backend whose every operation reports [`PropError::Unsupported`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

impl UnsupportedBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ScalarStore for UnsupportedBackend {
    fn get(&self, _key: &str, _default: &str) -> Result<String> {
        Err(PropError::Unsupported("get"))
    }

    fn get_all(&self) -> Result<BTreeMap<String, String>> {
        Err(PropError::Unsupported("get-all"))
    }

    fn get_all_by_prefix(&self, _prefix: &str) -> Result<BTreeMap<String, String>> {
        Err(PropError::Unsupported("get-all"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(PropError::Unsupported("set"))
    }

    fn del(&self, _key: &str) -> Result<()> {
        Err(PropError::Unsupported("del"))
    }

    fn exists(&self, _key: &str) -> Result<bool> {
        Err(PropError::Unsupported("exists"))
    }
}

impl ListStore for UnsupportedBackend {
    fn lindex(&self, _key: &str, _index: i64) -> Result<String> {
        Err(PropError::Unsupported("lindex"))
    }

    fn lismember(&self, _key: &str, _element: &str) -> Result<bool> {
        Err(PropError::Unsupported("lismember"))
    }

    fn llen(&self, _key: &str) -> Result<usize> {
        Err(PropError::Unsupported("llen"))
    }

    fn lrange(&self, _key: &str) -> Result<Vec<String>> {
        Err(PropError::Unsupported("lrange"))
    }

    fn lrange_from(&self, _key: &str, _start: i64) -> Result<Vec<String>> {
        Err(PropError::Unsupported("lrange"))
    }

    fn lrange_from_to(&self, _key: &str, _start: i64, _stop: i64) -> Result<Vec<String>> {
        Err(PropError::Unsupported("lrange"))
    }

    fn lrem(&self, _key: &str, _count: i64, _element: &str) -> Result<usize> {
        Err(PropError::Unsupported("lrem"))
    }

    fn lset(&self, _key: &str, _index: i64, _element: &str) -> Result<()> {
        Err(PropError::Unsupported("lset"))
    }

    fn rpush(&self, _key: &str, _elements: &[String]) -> Result<usize> {
        Err(PropError::Unsupported("rpush"))
    }
}

impl SetStore for UnsupportedBackend {
    fn sadd(&self, _key: &str, _members: &[String]) -> Result<usize> {
        Err(PropError::Unsupported("sadd"))
    }

    fn sismember(&self, _key: &str, _member: &str) -> Result<bool> {
        Err(PropError::Unsupported("sismember"))
    }

    fn smembers(&self, _key: &str) -> Result<BTreeSet<String>> {
        Err(PropError::Unsupported("smembers"))
    }

    fn srem(&self, _key: &str, _members: &[String]) -> Result<usize> {
        Err(PropError::Unsupported("srem"))
    }
}

impl Backend for UnsupportedBackend {
    fn backend_export(&self) -> Result<PropertyCollection> {
        Err(PropError::Unsupported("backend export"))
    }

    fn backend_import(&self, _collection: &PropertyCollection, _clear: bool) -> Result<()> {
        Err(PropError::Unsupported("backend import"))
    }

    fn backend_reset(&self) -> Result<()> {
        Err(PropError::Unsupported("backend reset"))
    }

    fn namespace_exists(&self, _namespace: &str) -> Result<bool> {
        Err(PropError::Unsupported("namespace exists"))
    }

    fn namespace_clear(&self, _namespace: &str) -> Result<()> {
        Err(PropError::Unsupported("namespace clear"))
    }
}
