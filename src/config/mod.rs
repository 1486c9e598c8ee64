// ABOUTME: Raw role configuration - serde types, builders and source discovery.
// ABOUTME: Loads TOML or JSON from disk, the environment, or the embedded seed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ConfigError;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ROLEGATE_CONFIG";

/// Embedded default role seed.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Raw, unvalidated role configuration.
///
/// Turned into a [`RoleTable`](crate::role::RoleTable) by
/// [`load`](crate::role::load), which resolves every alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Alias to canonical permission map.
    #[serde(default)]
    pub permissions: BTreeMap<String, String>,

    /// Role definitions, in file order.
    #[serde(default)]
    pub roles: Vec<RoleConfig>,

    /// Optional per-principal seed of roles and direct grants.
    #[serde(default)]
    pub principals: Vec<PrincipalSeed>,
}

/// One role as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resource name (or `*`) to permission aliases.
    #[serde(default)]
    pub resources: BTreeMap<String, AliasList>,
}

/// Permission aliases for one resource: `"view-me,update-me"` or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasList {
    Joined(String),
    List(Vec<String>),
}

impl AliasList {
    /// Individual aliases, trimmed, with empty segments dropped.
    pub fn aliases(&self) -> Vec<&str> {
        let parts: Vec<&str> = match self {
            AliasList::Joined(s) => s.split(',').collect(),
            AliasList::List(items) => items.iter().map(String::as_str).collect(),
        };
        parts
            .into_iter()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }
}

impl From<&str> for AliasList {
    fn from(value: &str) -> Self {
        AliasList::Joined(value.to_string())
    }
}

impl From<Vec<&str>> for AliasList {
    fn from(value: Vec<&str>) -> Self {
        AliasList::List(value.into_iter().map(String::from).collect())
    }
}

/// Seeded role assignments and direct grants for one principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalSeed {
    pub id: Uuid,

    #[serde(default)]
    pub roles: Vec<String>,

    /// Fully qualified permissions granted directly, e.g. `restaurant.update.all`.
    #[serde(default)]
    pub grants: Vec<String>,

    /// Fully qualified permissions denied directly. Denials win over any allow.
    #[serde(default)]
    pub denials: Vec<String>,
}

impl PrincipalSeed {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            roles: Vec::new(),
            grants: Vec::new(),
            denials: Vec::new(),
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn grant(mut self, permission: impl Into<String>) -> Self {
        self.grants.push(permission.into());
        self
    }

    pub fn deny(mut self, permission: impl Into<String>) -> Self {
        self.denials.push(permission.into());
        self
    }
}

impl RoleConfig {
    /// Create a role with no resources.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            resources: BTreeMap::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grant `aliases` on `resource`. Repeating a resource replaces its aliases.
    pub fn resource(mut self, resource: impl Into<String>, aliases: impl Into<AliasList>) -> Self {
        self.resources.insert(resource.into(), aliases.into());
        self
    }
}

/// Where a configuration was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => f.write_str("<embedded defaults>"),
        }
    }
}

impl RbacConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias mapping.
    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.permissions.insert(alias.into(), canonical.into());
        self
    }

    /// Append a role definition.
    pub fn role(mut self, role: RoleConfig) -> Self {
        self.roles.push(role);
        self
    }

    /// Append a principal seed.
    pub fn principal(mut self, seed: PrincipalSeed) -> Self {
        self.principals.push(seed);
        self
    }

    /// The embedded default seed.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULTS_TOML)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a file, choosing the format from its extension (`.toml` or `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ));
            }
        };

        debug!(path = %path.display(), roles = config.roles.len(), "parsed config file");
        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// Precedence: `explicit`, then the `ROLEGATE_CONFIG` environment
    /// variable, then the embedded defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let env_path = std::env::var(CONFIG_ENV).ok();
        let source = select_source(explicit, env_path.as_deref());
        let config = Self::load_source(&source)?;
        info!(source = %source, roles = config.roles.len(), "loaded role configuration");
        Ok((config, source))
    }

    /// Load from an already selected source.
    pub fn load_source(source: &ConfigSource) -> Result<Self, ConfigError> {
        match source {
            ConfigSource::File(path) => Self::from_path(path),
            ConfigSource::Embedded => Self::embedded(),
        }
    }
}

/// Pick a config source from an explicit path and the environment value.
pub fn select_source(explicit: Option<&Path>, env_value: Option<&str>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::File(path.to_path_buf());
    }
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => ConfigSource::File(PathBuf::from(value)),
        _ => ConfigSource::Embedded,
    }
}

#[cfg(test)]
mod config_test;
