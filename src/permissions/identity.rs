//! Identity resolution
//!
//! Maps system user and group names to numeric ids.

use std::collections::HashMap;

use nix::unistd::{Group, User};

use crate::error::{PropError, Result};

/// Resolves user and group names to numeric ids
pub trait IdentityResolver: Send + Sync {
    fn resolve_user(&self, name: &str) -> Result<u32>;

    fn resolve_group(&self, name: &str) -> Result<u32>;
}

// =============================================================================
// System Identity
// =============================================================================

/// Resolver backed by the operating system's account database
///
/// Lookups go through the reentrant passwd/group calls, so NSS sources
/// configured on the host are honored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl IdentityResolver for SystemIdentity {
    fn resolve_user(&self, name: &str) -> Result<u32> {
        check_name(name)?;

        match User::from_name(name) {
            Ok(Some(user)) => Ok(user.uid.as_raw()),
            Ok(None) => Err(PropError::IdentityResolution(format!("Unknown user: {}", name))),
            Err(errno) => Err(PropError::IdentityResolution(format!(
                "Unable to look up user {}: {}",
                name, errno
            ))),
        }
    }

    fn resolve_group(&self, name: &str) -> Result<u32> {
        check_name(name)?;

        match Group::from_name(name) {
            Ok(Some(group)) => Ok(group.gid.as_raw()),
            Ok(None) => Err(PropError::IdentityResolution(format!("Unknown group: {}", name))),
            Err(errno) => Err(PropError::IdentityResolution(format!(
                "Unable to look up group {}: {}",
                name, errno
            ))),
        }
    }
}

/// Account names never contain NUL
fn check_name(name: &str) -> Result<()> {
    if name.contains('\0') {
        return Err(PropError::IdentityResolution(format!("Invalid identity name: {:?}", name)));
    }
    Ok(())
}

// =============================================================================
// Static Identity
// =============================================================================

/// Resolver backed by a fixed name → id table
///
/// Useful in tests and in deployments that pin ownership to known ids.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    users: HashMap<String, u32>,
    groups: HashMap<String, u32>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, name: impl Into<String>, uid: u32) -> Self {
        self.users.insert(name.into(), uid);
        self
    }

    pub fn with_group(mut self, name: impl Into<String>, gid: u32) -> Self {
        self.groups.insert(name.into(), gid);
        self
    }
}

impl IdentityResolver for StaticIdentity {
    fn resolve_user(&self, name: &str) -> Result<u32> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| PropError::IdentityResolution(format!("Unknown user: {}", name)))
    }

    fn resolve_group(&self, name: &str) -> Result<u32> {
        self.groups
            .get(name)
            .copied()
            .ok_or_else(|| PropError::IdentityResolution(format!("Unknown group: {}", name)))
    }
}
