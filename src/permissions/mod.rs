//! Permissions Module
//!
//! Applies mode bits and ownership to everything the file engine writes.
//!
//! ## Responsibilities
//! - chmod key files (`0600`) and namespace directories (`0755`)
//! - Resolve the configured system user/group to numeric ids
//! - chown the written path
//!
//! A failure at any step fails the enclosing write.

mod identity;

pub use identity::{IdentityResolver, StaticIdentity, SystemIdentity};

use std::fs::{self, Permissions};
use std::os::unix::fs::{chown, PermissionsExt};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;

/// Sets mode and ownership on written paths
#[derive(Clone)]
pub struct PermissionEnforcer {
    /// Owner to apply, if configured
    system_user: Option<String>,

    /// Group to apply, if configured
    system_group: Option<String>,

    dir_mode: u32,
    file_mode: u32,

    /// Name → id lookup
    identity: Arc<dyn IdentityResolver>,
}

impl PermissionEnforcer {
    pub fn new(config: &Config, identity: Arc<dyn IdentityResolver>) -> Self {
        Self {
            system_user: config.system_user.clone(),
            system_group: config.system_group.clone(),
            dir_mode: config.dir_mode,
            file_mode: config.file_mode,
            identity,
        }
    }

    /// Apply the key file mode and ownership
    pub fn apply_to_file(&self, path: &Path) -> Result<()> {
        self.apply(path, self.file_mode)
    }

    /// Apply the namespace directory mode and ownership
    pub fn apply_to_dir(&self, path: &Path) -> Result<()> {
        self.apply(path, self.dir_mode)
    }

    fn apply(&self, path: &Path, mode: u32) -> Result<()> {
        // Step 1: Mode bits
        fs::set_permissions(path, Permissions::from_mode(mode))?;

        // Step 2: Resolve owner ids (group first, then user)
        let gid = match &self.system_group {
            Some(group) => Some(self.identity.resolve_group(group)?),
            None => None,
        };
        let uid = match &self.system_user {
            Some(user) => Some(self.identity.resolve_user(user)?),
            None => None,
        };

        if uid.is_none() && gid.is_none() {
            return Ok(());
        }

        // Step 3: Ownership
        chown(path, uid, gid)?;
        tracing::trace!(path = %path.display(), mode = %format!("{:o}", mode), ?uid, ?gid, "applied permissions");

        Ok(())
    }
}

impl std::fmt::Debug for PermissionEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionEnforcer")
            .field("system_user", &self.system_user)
            .field("system_group", &self.system_group)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .finish_non_exhaustive()
    }
}
