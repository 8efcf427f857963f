//! Command definitions
//!
//! One variant per backend operation, carrying already-parsed arguments.

use std::path::PathBuf;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // -------------------------------------------------------------------------
    // Scalars
    // -------------------------------------------------------------------------
    /// Read a value, falling back to `default` when it is non-empty
    Get { key: String, default: String },

    /// Read every value, optionally only keys starting with `prefix`
    GetAll { prefix: Option<String> },

    Set { key: String, value: String },

    Del { key: String },

    Exists { key: String },

    // -------------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------------
    Lindex { key: String, index: i64 },

    Lismember { key: String, element: String },

    Llen { key: String },

    /// Whole list, tail from `start`, or `[start, stop]`
    Lrange {
        key: String,
        start: Option<i64>,
        stop: Option<i64>,
    },

    Lrem {
        key: String,
        count: i64,
        element: String,
    },

    Lset {
        key: String,
        index: i64,
        element: String,
    },

    Rpush { key: String, elements: Vec<String> },

    // -------------------------------------------------------------------------
    // Sets
    // -------------------------------------------------------------------------
    Sadd { key: String, members: Vec<String> },

    Sismember { key: String, member: String },

    Smembers { key: String },

    Srem { key: String, members: Vec<String> },

    // -------------------------------------------------------------------------
    // Administration
    // -------------------------------------------------------------------------
    /// Write the namespace to a JSON document at `path`
    BackendExport { path: PathBuf },

    /// Load a JSON document from `path`, optionally clearing first
    BackendImport { path: PathBuf, clear: bool },

    BackendReset,

    NamespaceExists { namespace: String },

    NamespaceClear { namespace: String },
}

impl Command {
    /// Command name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get { .. } => "get",
            Command::GetAll { .. } => "get-all",
            Command::Set { .. } => "set",
            Command::Del { .. } => "del",
            Command::Exists { .. } => "exists",
            Command::Lindex { .. } => "lindex",
            Command::Lismember { .. } => "lismember",
            Command::Llen { .. } => "llen",
            Command::Lrange { .. } => "lrange",
            Command::Lrem { .. } => "lrem",
            Command::Lset { .. } => "lset",
            Command::Rpush { .. } => "rpush",
            Command::Sadd { .. } => "sadd",
            Command::Sismember { .. } => "sismember",
            Command::Smembers { .. } => "smembers",
            Command::Srem { .. } => "srem",
            Command::BackendExport { .. } => "backend export",
            Command::BackendImport { .. } => "backend import",
            Command::BackendReset => "backend reset",
            Command::NamespaceExists { .. } => "namespace exists",
            Command::NamespaceClear { .. } => "namespace clear",
        }
    }
}
