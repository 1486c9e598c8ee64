// ABOUTME: Principal types - ids, assignments, and the Actor trait.
// ABOUTME: Any caller-side user type can act by implementing Actor.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Anything that can be authorized: an id, role names and direct grants.
///
/// Direct grants and denials use fully qualified names such as
/// `restaurant.update.all`.
pub trait Actor {
    fn id(&self) -> PrincipalId;

    fn roles(&self) -> Vec<&str>;

    fn has_direct_grant(&self, _qualified: &str) -> bool {
        false
    }

    fn has_direct_denial(&self, _qualified: &str) -> bool {
        false
    }
}

/// A per-request snapshot of a principal's roles and direct permissions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub grants: BTreeSet<String>,
    #[serde(default)]
    pub denials: BTreeSet<String>,
}

impl Principal {
    /// A principal with no roles and no grants.
    pub fn new(id: impl Into<PrincipalId>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeSet::new(),
            grants: BTreeSet::new(),
            denials: BTreeSet::new(),
        }
    }

    /// Add a role assignment.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Add a direct grant.
    pub fn with_grant(mut self, qualified: impl Into<String>) -> Self {
        self.grants.insert(qualified.into());
        self
    }

    /// Add a direct denial.
    pub fn with_denial(mut self, qualified: impl Into<String>) -> Self {
        self.denials.insert(qualified.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl Actor for Principal {
    fn id(&self) -> PrincipalId {
        self.id
    }

    fn roles(&self) -> Vec<&str> {
        self.roles.iter().map(String::as_str).collect()
    }

    fn has_direct_grant(&self, qualified: &str) -> bool {
        self.grants.contains(qualified)
    }

    fn has_direct_denial(&self, qualified: &str) -> bool {
        self.denials.contains(qualified)
    }
}
