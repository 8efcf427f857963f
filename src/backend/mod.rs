//! Backend Module
//!
//! The public contract every storage engine implements.
//!
//! ## Responsibilities
//! - Declare the scalar, list and set capability sets
//! - Declare namespace-level admin operations (export/import/reset)
//! - Select a concrete engine from a backend URL
//!
//! ## Engine Selection
//! ```text
//! file:/var/lib/prop/data?namespace=app&system-user=root&system-group=root
//! └─┬─┘└───────┬────────┘ └──────────────────────┬──────────────────────┘
//! scheme   storage root                      query parameters
//! ```
//! - `file:` → [`FileBackend`](crate::file::FileBackend)
//! - anything else, or an unparseable URL → [`UnsupportedBackend`]

mod property;
mod unsupported;

pub use property::{read_collection, write_collection, DataType, Property, PropertyCollection, PropertyValue};
pub use unsupported::UnsupportedBackend;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::file::FileBackend;
use crate::permissions::{IdentityResolver, SystemIdentity};

// =============================================================================
// Capability Sets
// =============================================================================

/// Single string values, one per key
pub trait ScalarStore {
    /// Read a value; a missing key yields `default` when it is non-empty,
    /// otherwise `NotFound`
    fn get(&self, key: &str, default: &str) -> Result<String>;

    /// Every key in the namespace with its value
    fn get_all(&self) -> Result<BTreeMap<String, String>>;

    /// Every key starting with `prefix` with its value
    fn get_all_by_prefix(&self, prefix: &str) -> Result<BTreeMap<String, String>>;

    /// Write a value verbatim
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key succeeds
    fn del(&self, key: &str) -> Result<()>;

    /// Whether the key exists
    fn exists(&self, key: &str) -> Result<bool>;
}

/// Ordered sequences of strings, duplicates allowed
pub trait ListStore {
    fn lindex(&self, key: &str, index: i64) -> Result<String>;

    /// `Ok(true)` when present; an absent element is `NotFound`
    fn lismember(&self, key: &str, element: &str) -> Result<bool>;

    fn llen(&self, key: &str) -> Result<usize>;

    fn lrange(&self, key: &str) -> Result<Vec<String>>;

    fn lrange_from(&self, key: &str, start: i64) -> Result<Vec<String>>;

    /// Elements with index in `[start, stop]`
    fn lrange_from_to(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>>;

    /// Remove occurrences of `element`; the sign of `count` picks the scan
    /// direction and zero removes all. Returns the number removed.
    fn lrem(&self, key: &str, count: i64, element: &str) -> Result<usize>;

    /// Replace the element at `index`; negative indices count from the tail
    fn lset(&self, key: &str, index: i64, element: &str) -> Result<()>;

    /// Append to the tail and return the new length
    fn rpush(&self, key: &str, elements: &[String]) -> Result<usize>;
}

/// Unordered collections of unique strings
pub trait SetStore {
    /// Returns how many members were actually added
    fn sadd(&self, key: &str, members: &[String]) -> Result<usize>;

    fn sismember(&self, key: &str, member: &str) -> Result<bool>;

    fn smembers(&self, key: &str) -> Result<BTreeSet<String>>;

    /// Returns how many members were actually removed
    fn srem(&self, key: &str, members: &[String]) -> Result<usize>;
}

/// The full operation surface of a storage engine
///
/// Engines that cannot support an operation return
/// [`PropError::Unsupported`](crate::PropError::Unsupported) instead of
/// silently doing nothing.
pub trait Backend: ScalarStore + ListStore + SetStore {
    /// Snapshot every key of the namespace
    fn backend_export(&self) -> Result<PropertyCollection>;

    /// Apply a collection, optionally removing every existing key first
    fn backend_import(&self, collection: &PropertyCollection, clear: bool) -> Result<()>;

    /// Remove every key of the namespace
    fn backend_reset(&self) -> Result<()>;

    fn namespace_exists(&self, namespace: &str) -> Result<bool>;

    /// Remove every key of another (or the same) namespace
    fn namespace_clear(&self, namespace: &str) -> Result<()>;
}

// =============================================================================
// Construction
// =============================================================================

/// Select and build an engine from a backend URL
///
/// Ownership is resolved through the operating system's account database.
pub fn construct_backend(url: &str, namespace: &str) -> Result<Box<dyn Backend>> {
    construct_backend_with_identity(url, namespace, Arc::new(SystemIdentity))
}

/// Select and build an engine, resolving ownership through `identity`
pub fn construct_backend_with_identity(
    url: &str,
    namespace: &str,
    identity: Arc<dyn IdentityResolver>,
) -> Result<Box<dyn Backend>> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(url, error = %e, "unparseable backend url, using unsupported backend");
            return Ok(Box::new(UnsupportedBackend::new()));
        }
    };

    if parsed.scheme() != "file" {
        tracing::debug!(scheme = parsed.scheme(), "no engine for scheme, using unsupported backend");
        return Ok(Box::new(UnsupportedBackend::new()));
    }

    let config = Config::from_url(&parsed, namespace)?;
    let backend = FileBackend::open(config, identity)?;
    Ok(Box::new(backend))
}
