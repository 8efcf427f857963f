//! Dispatch Module
//!
//! Routes parsed commands to a backend and shapes the results.
//!
//! ## Flow
//! ```text
//!   argv ──► clap ──► Command ──► execute(&dyn Backend) ──► Reply ──► stdout / exit status
//!                                        │
//!                                        └──► PropError ──► stderr / exit 1
//! ```
//!
//! ### Exit Status
//! - 0: success, or a true answer (`exists`, `sismember`, ...)
//! - 1: failure, not found, or a false answer

mod command;
mod reply;

pub use command::Command;
pub use reply::{Reply, Status};

use crate::backend::{read_collection, write_collection, Backend};
use crate::error::Result;

/// Execute a command against a backend
pub fn execute(backend: &dyn Backend, command: Command) -> Result<Reply> {
    tracing::debug!(command = command.name(), "executing");

    let reply = match command {
        Command::Get { key, default } => Reply::Value(backend.get(&key, &default)?),
        Command::GetAll { prefix } => match prefix {
            Some(prefix) => Reply::Pairs(backend.get_all_by_prefix(&prefix)?),
            None => Reply::Pairs(backend.get_all()?),
        },
        Command::Set { key, value } => {
            backend.set(&key, &value)?;
            Reply::Done
        }
        Command::Del { key } => {
            backend.del(&key)?;
            Reply::Done
        }
        Command::Exists { key } => Reply::Bool(backend.exists(&key)?),

        Command::Lindex { key, index } => Reply::Value(backend.lindex(&key, index)?),
        Command::Lismember { key, element } => Reply::Bool(backend.lismember(&key, &element)?),
        Command::Llen { key } => Reply::Count(backend.llen(&key)?),
        Command::Lrange { key, start, stop } => {
            let values = match (start, stop) {
                (None, _) => backend.lrange(&key)?,
                (Some(start), None) => backend.lrange_from(&key, start)?,
                (Some(start), Some(stop)) => backend.lrange_from_to(&key, start, stop)?,
            };
            Reply::Values(values)
        }
        Command::Lrem {
            key,
            count,
            element,
        } => Reply::Count(backend.lrem(&key, count, &element)?),
        Command::Lset {
            key,
            index,
            element,
        } => {
            backend.lset(&key, index, &element)?;
            Reply::Done
        }
        Command::Rpush { key, elements } => Reply::Count(backend.rpush(&key, &elements)?),

        Command::Sadd { key, members } => Reply::Count(backend.sadd(&key, &members)?),
        Command::Sismember { key, member } => Reply::Bool(backend.sismember(&key, &member)?),
        Command::Smembers { key } => Reply::from(backend.smembers(&key)?),
        Command::Srem { key, members } => Reply::Count(backend.srem(&key, &members)?),

        Command::BackendExport { path } => {
            let collection = backend.backend_export()?;
            write_collection(&collection, &path)?;
            Reply::Done
        }
        Command::BackendImport { path, clear } => {
            let collection = read_collection(&path)?;
            backend.backend_import(&collection, clear)?;
            Reply::Done
        }
        Command::BackendReset => {
            backend.backend_reset()?;
            Reply::Done
        }
        Command::NamespaceExists { namespace } => Reply::Bool(backend.namespace_exists(&namespace)?),
        Command::NamespaceClear { namespace } => {
            backend.namespace_clear(&namespace)?;
            Reply::Done
        }
    };

    Ok(reply)
}
