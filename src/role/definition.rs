// ABOUTME: RoleDefinition and RoleTable - the resolved, immutable role structure.
// ABOUTME: Answers whether a single role grants a permission on a resource.

use std::collections::BTreeMap;

use crate::permission::{CanonicalPermission, PermissionCatalog, WILDCARD};

/// A role with its resolved permissions per resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    resources: BTreeMap<String, Vec<CanonicalPermission>>,
}

impl RoleDefinition {
    pub(crate) fn new(
        name: String,
        display_name: Option<String>,
        description: Option<String>,
        resources: BTreeMap<String, Vec<CanonicalPermission>>,
    ) -> Self {
        Self {
            name,
            display_name,
            description,
            resources,
        }
    }

    /// Permissions for a resource entry, without wildcard fallback.
    pub fn permissions(&self, resource: &str) -> Option<&[CanonicalPermission]> {
        self.resources.get(resource).map(Vec::as_slice)
    }

    /// Resource keys, sorted. May include `*`.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Whether this role grants `permission` on `resource`.
    ///
    /// The exact resource entry is used when present; the `*` entry only
    /// applies to resources the role does not list.
    pub fn allows(&self, resource: &str, permission: &str) -> bool {
        let entry = self
            .resources
            .get(resource)
            .or_else(|| self.resources.get(WILDCARD));

        match entry {
            Some(permissions) => permissions.iter().any(|p| p.grants(permission)),
            None => false,
        }
    }

    /// Whether this role grants every permission on every resource.
    pub fn is_unrestricted(&self) -> bool {
        self.resources
            .get(WILDCARD)
            .is_some_and(|perms| perms.contains(&CanonicalPermission::Any))
            && self
                .resources
                .values()
                .all(|perms| perms.contains(&CanonicalPermission::Any))
    }
}

/// The loaded role table, keyed by role name.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    catalog: PermissionCatalog,
    roles: BTreeMap<String, RoleDefinition>,
}

impl RoleTable {
    pub(crate) fn new(catalog: PermissionCatalog, roles: BTreeMap<String, RoleDefinition>) -> Self {
        Self { catalog, roles }
    }

    /// A table with no roles. Every check against it is denied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, role: &str) -> Option<&RoleDefinition> {
        self.roles.get(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Role names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.roles.keys().map(String::as_str).collect()
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.values()
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
