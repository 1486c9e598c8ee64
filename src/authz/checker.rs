// ABOUTME: Implements the authorization check and the CapabilityCheck seam.
// ABOUTME: Pure evaluation of a principal snapshot against one role table.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::permission::qualified;
use crate::principal::{Actor, PrincipalId, PrincipalStore};
use crate::role::{RoleTable, RoleTableHandle};

/// The outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The actor holds the permission.
    Allow,
    /// No rule grants the permission, or a direct denial applies.
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// The narrow interface policies depend on.
pub trait CapabilityCheck: Send + Sync {
    /// Whether `actor` may perform `permission` (e.g. `view.me`) on `resource`.
    fn can_perform(&self, actor: &dyn Actor, resource: &str, permission: &str) -> bool;
}

/// Evaluate one request against `table`.
///
/// 1. A direct denial of `resource.permission` denies.
/// 2. A direct grant of `resource.permission` allows.
/// 3. Any assigned role whose resource entry (exact, else `*`) grants the
///    permission allows.
/// 4. Otherwise deny.
pub fn evaluate(table: &RoleTable, actor: &dyn Actor, resource: &str, permission: &str) -> Decision {
    let name = qualified(resource, permission);
    if actor.has_direct_denial(&name) {
        return Decision::Deny;
    }
    if actor.has_direct_grant(&name) {
        return Decision::Allow;
    }

    for role in actor.roles() {
        match table.get(role) {
            Some(definition) if definition.allows(resource, permission) => return Decision::Allow,
            Some(_) => {}
            None => warn!(role, principal = %actor.id(), "role not in table, ignoring"),
        }
    }
    Decision::Deny
}

impl<T: CapabilityCheck + ?Sized> CapabilityCheck for Arc<T> {
    fn can_perform(&self, actor: &dyn Actor, resource: &str, permission: &str) -> bool {
        (**self).can_perform(actor, resource, permission)
    }
}

impl CapabilityCheck for RoleTable {
    fn can_perform(&self, actor: &dyn Actor, resource: &str, permission: &str) -> bool {
        evaluate(self, actor, resource, permission).is_allowed()
    }
}

/// Authorization checks against a hot-reloadable role table.
#[derive(Debug, Clone, Default)]
pub struct Authorizer {
    tables: RoleTableHandle,
}

impl Authorizer {
    pub fn new(tables: RoleTableHandle) -> Self {
        Self { tables }
    }

    /// The handle this authorizer reads from. Reload through it.
    pub fn tables(&self) -> &RoleTableHandle {
        &self.tables
    }

    /// Check a request. Each call evaluates against a single table version.
    pub fn check(&self, actor: &dyn Actor, resource: &str, permission: &str) -> Decision {
        let (table, version) = self.tables.snapshot();
        let decision = evaluate(&table, actor, resource, permission);
        debug!(
            principal = %actor.id(),
            resource,
            permission,
            version,
            ?decision,
            "authorization check"
        );
        decision
    }

    pub fn is_allowed(&self, actor: &dyn Actor, resource: &str, permission: &str) -> bool {
        self.check(actor, resource, permission).is_allowed()
    }

    /// Fetch a principal's snapshot from `store` and check it.
    pub async fn check_principal(
        &self,
        store: &dyn PrincipalStore,
        id: PrincipalId,
        resource: &str,
        permission: &str,
    ) -> Result<Decision, StoreError> {
        let principal = store.roles_and_permissions(id).await?;
        Ok(self.check(&principal, resource, permission))
    }
}

impl CapabilityCheck for Authorizer {
    fn can_perform(&self, actor: &dyn Actor, resource: &str, permission: &str) -> bool {
        self.is_allowed(actor, resource, permission)
    }
}
