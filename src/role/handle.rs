// ABOUTME: RoleTableHandle - shared, hot-reloadable reference to the role table.
// ABOUTME: Readers clone an Arc snapshot; reloads swap the whole table at once.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::{RoleTable, load};
use crate::config::RbacConfig;
use crate::error::ConfigError;

struct Versioned {
    table: Arc<RoleTable>,
    version: u64,
}

/// A thread-safe, swappable reference to the current [`RoleTable`].
///
/// Cloning a handle shares the underlying table. A caller that takes
/// [`current`](Self::current) keeps evaluating against that exact table
/// even if a reload happens meanwhile.
#[derive(Clone)]
pub struct RoleTableHandle {
    inner: Arc<RwLock<Versioned>>,
}

impl RoleTableHandle {
    /// Wrap an already loaded table as version 1.
    pub fn new(table: RoleTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned {
                table: Arc::new(table),
                version: 1,
            })),
        }
    }

    /// Load `config` and wrap the result.
    pub fn from_config(config: &RbacConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(load(config)?))
    }

    /// Snapshot of the current table.
    pub fn current(&self) -> Arc<RoleTable> {
        Arc::clone(&self.inner.read().table)
    }

    /// Snapshot of the current table together with its version.
    pub fn snapshot(&self) -> (Arc<RoleTable>, u64) {
        let guard = self.inner.read();
        (Arc::clone(&guard.table), guard.version)
    }

    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Swap in a new table, returning its version.
    pub fn replace(&self, table: RoleTable) -> u64 {
        let roles = table.len();
        let table = Arc::new(table);
        let version = {
            let mut guard = self.inner.write();
            guard.table = table;
            guard.version += 1;
            guard.version
        };
        info!(version, roles, "role table swapped");
        version
    }

    /// Validate `config` and swap it in. On error the current table stays.
    pub fn reload(&self, config: &RbacConfig) -> Result<u64, ConfigError> {
        let table = load(config)?;
        Ok(self.replace(table))
    }
}

impl Default for RoleTableHandle {
    fn default() -> Self {
        Self::new(RoleTable::empty())
    }
}

impl std::fmt::Debug for RoleTableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.read();
        f.debug_struct("RoleTableHandle")
            .field("version", &guard.version)
            .field("roles", &guard.table.names())
            .finish()
    }
}
