// ABOUTME: Role definition loader - turns RbacConfig into a validated RoleTable.
// ABOUTME: Every alias is resolved here, so a bad config fails before serving.

use std::collections::BTreeMap;

use tracing::info;

use super::{RoleDefinition, RoleTable};
use crate::config::{RbacConfig, RoleConfig};
use crate::error::ConfigError;
use crate::permission::{PermissionCatalog, WILDCARD, is_identifier};

/// Load and validate a role table.
///
/// # Errors
///
/// - [`ConfigError::UnknownPermissionAlias`] (wrapped in
///   [`ConfigError::InRole`]) when a role uses an alias the catalog lacks.
/// - [`ConfigError::DuplicateRoleDefinition`] when a role name repeats.
/// - [`ConfigError::DuplicateResource`] (wrapped) when two resource keys of
///   one role trim to the same name.
/// - [`ConfigError::InvalidName`] for malformed role, resource or alias names.
pub fn load(config: &RbacConfig) -> Result<RoleTable, ConfigError> {
    let catalog = PermissionCatalog::from_pairs(&config.permissions)?;

    let mut roles = BTreeMap::new();
    for raw in &config.roles {
        let definition = load_role(raw, &catalog)?;
        if roles.contains_key(&definition.name) {
            return Err(ConfigError::DuplicateRoleDefinition(definition.name));
        }
        roles.insert(definition.name.clone(), definition);
    }

    info!(
        roles = roles.len(),
        aliases = catalog.len(),
        "role table loaded"
    );
    Ok(RoleTable::new(catalog, roles))
}

fn load_role(raw: &RoleConfig, catalog: &PermissionCatalog) -> Result<RoleDefinition, ConfigError> {
    let name = raw.name.trim();
    if !is_identifier(name) {
        return Err(ConfigError::InvalidName {
            kind: "role",
            name: raw.name.clone(),
        });
    }

    let mut resources = BTreeMap::new();
    for (resource, aliases) in &raw.resources {
        let resource = resource.trim();
        let in_role = |source: ConfigError| ConfigError::InRole {
            role: name.to_string(),
            resource: resource.to_string(),
            source: Box::new(source),
        };

        if resource != WILDCARD && !is_identifier(resource) {
            return Err(in_role(ConfigError::InvalidName {
                kind: "resource",
                name: resource.to_string(),
            }));
        }

        let mut permissions = Vec::new();
        for alias in aliases.aliases() {
            let permission = catalog.resolve(alias).map_err(in_role)?;
            if !permissions.contains(&permission) {
                permissions.push(permission);
            }
        }
        if resources.insert(resource.to_string(), permissions).is_some() {
            return Err(in_role(ConfigError::DuplicateResource(resource.to_string())));
        }
    }

    Ok(RoleDefinition::new(
        name.to_string(),
        raw.display_name.clone(),
        raw.description.clone(),
        resources,
    ))
}

impl RoleTable {
    /// Shorthand for [`load`].
    pub fn from_config(config: &RbacConfig) -> Result<Self, ConfigError> {
        load(config)
    }
}
