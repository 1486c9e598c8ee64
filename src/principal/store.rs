// ABOUTME: PrincipalStore trait and MemoryPrincipalStore implementation.
// ABOUTME: Stores hand out per-request Principal snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Principal, PrincipalId};
use crate::config::RbacConfig;
use crate::error::{ConfigError, StoreError};
use crate::permission::WILDCARD;
use crate::role::RoleTable;

/// Source of principal role assignments, usually backed by a database.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Fetch the current roles and direct permissions of a principal.
    async fn roles_and_permissions(&self, id: PrincipalId) -> Result<Principal, StoreError>;
}

/// A thread-safe in-memory principal store.
///
/// Cloning shares state.
#[derive(Default, Clone)]
pub struct MemoryPrincipalStore {
    principals: Arc<RwLock<HashMap<PrincipalId, Principal>>>,
}

impl MemoryPrincipalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the `principals` section of a config.
    ///
    /// Seeded roles must exist in `table` and seeded grants must be
    /// exact qualified names (`resource.permission`) with no `*` segment.
    pub async fn seeded(config: &RbacConfig, table: &RoleTable) -> Result<Self, ConfigError> {
        let store = Self::new();
        for seed in &config.principals {
            let mut principal = Principal::new(seed.id);
            for role in &seed.roles {
                if !table.contains(role) {
                    return Err(ConfigError::UnknownRole(role.clone()));
                }
                principal.roles.insert(role.clone());
            }
            for grant in &seed.grants {
                principal.grants.insert(checked_qualified(grant)?);
            }
            for denial in &seed.denials {
                principal.denials.insert(checked_qualified(denial)?);
            }
            store.insert(principal).await;
        }
        debug!(count = config.principals.len(), "seeded principal store");
        Ok(store)
    }

    /// Insert or replace a principal.
    pub async fn insert(&self, principal: Principal) {
        let mut principals = self.principals.write().await;
        principals.insert(principal.id, principal);
    }

    /// Remove a principal.
    pub async fn remove(&self, id: PrincipalId) -> Option<Principal> {
        let mut principals = self.principals.write().await;
        principals.remove(&id)
    }

    /// Attach a role. Returns false if the principal is unknown.
    pub async fn assign_role(&self, id: PrincipalId, role: impl Into<String>) -> bool {
        self.update(id, |p| {
            p.roles.insert(role.into());
        })
        .await
    }

    /// Detach a role. Returns false if the principal is unknown.
    pub async fn remove_role(&self, id: PrincipalId, role: &str) -> bool {
        self.update(id, |p| {
            p.roles.remove(role);
        })
        .await
    }

    /// Grant a qualified permission directly.
    pub async fn grant(&self, id: PrincipalId, qualified: impl Into<String>) -> bool {
        self.update(id, |p| {
            p.grants.insert(qualified.into());
        })
        .await
    }

    /// Deny a qualified permission directly.
    pub async fn deny(&self, id: PrincipalId, qualified: impl Into<String>) -> bool {
        self.update(id, |p| {
            p.denials.insert(qualified.into());
        })
        .await
    }

    pub async fn count(&self) -> usize {
        self.principals.read().await.len()
    }

    async fn update<F: FnOnce(&mut Principal)>(&self, id: PrincipalId, f: F) -> bool {
        let mut principals = self.principals.write().await;
        match principals.get_mut(&id) {
            Some(principal) => {
                f(principal);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn roles_and_permissions(&self, id: PrincipalId) -> Result<Principal, StoreError> {
        let principals = self.principals.read().await;
        principals
            .get(&id)
            .cloned()
            .ok_or(StoreError::PrincipalNotFound(id.0))
    }
}

fn checked_qualified(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    let well_formed = name
        .split_once('.')
        .is_some_and(|(resource, rest)| !resource.is_empty() && !rest.is_empty())
        && name.split('.').all(|part| !part.is_empty() && part != WILDCARD);
    if well_formed {
        Ok(name.to_string())
    } else {
        Err(ConfigError::InvalidName {
            kind: "qualified permission",
            name: name.to_string(),
        })
    }
}
