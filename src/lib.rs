//! # prop
//!
//! A local, namespaced property store with Redis-like primitives:
//! - Scalars (get/set/del/exists)
//! - Ordered lists (lindex, lrange, lrem, lset, rpush, ...)
//! - Unordered sets (sadd, sismember, smembers, srem)
//! - Namespace export/import as JSON
//!
//! Every key is one flat file; every mutation rewrites that file.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        prop CLI                              │
//! │                (clap → Command → Reply)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Backend (trait)                            │
//! │     ScalarStore + ListStore + SetStore + admin ops           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ FileBackend │          │ Unsupported │
//!   │ (file: url) │          │  (fallback) │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  KeyCodec   │─────────►│ Permission  │
//!   │ root/ns/key │          │  Enforcer   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use prop::prelude::*;
//!
//! let backend = construct_backend("file:/var/lib/prop/data", "app")?;
//! backend.set("port", "8080")?;
//! backend.rpush("hosts", &["a".to_string(), "b".to_string()])?;
//! assert_eq!(backend.get("port", "")?, "8080");
//! # Ok::<(), prop::PropError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod backend;
pub mod file;
pub mod permissions;
pub mod dispatch;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PropError, Result};
pub use config::Config;
pub use backend::{construct_backend, construct_backend_with_identity, Backend};
pub use file::FileBackend;

/// Everything needed to call backend operations
pub mod prelude {
    pub use crate::backend::{
        construct_backend, construct_backend_with_identity, Backend, ListStore, ScalarStore, SetStore,
    };
    pub use crate::config::Config;
    pub use crate::error::{PropError, Result};
    pub use crate::file::FileBackend;
}

// =============================================================================
// Version Info
// =============================================================================

/// Current version of prop
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
