// ABOUTME: Defines all error types for rolegate using thiserror.
// ABOUTME: Each concern has its own error enum, unified under RolegateError.

use std::fmt;

/// Top-level error type for the rolegate library.
#[derive(Debug, thiserror::Error)]
pub enum RolegateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Errors raised while loading the permission catalog and role table.
///
/// All of these are fatal at startup: a process holding a malformed
/// configuration must not serve requests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown permission alias '{0}'")]
    UnknownPermissionAlias(String),

    #[error("Role '{0}' is defined more than once")]
    DuplicateRoleDefinition(String),

    #[error("Resource '{0}' is listed more than once")]
    DuplicateResource(String),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    #[error("Role '{role}', resource '{resource}': {source}")]
    InRole {
        role: String,
        resource: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// The innermost error, skipping role/resource context wrappers.
    pub fn root(&self) -> &ConfigError {
        match self {
            ConfigError::InRole { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors returned when a caller asks the gate to enforce a decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not allowed to {ability} {resource}")]
    Forbidden { resource: String, ability: String },
}

/// Errors from principal stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Principal not found: {0}")]
    PrincipalNotFound(uuid::Uuid),

    #[error("Store backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Errors from logging setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Unknown log format '{0}'")]
    Format(String),

    #[error("Subscriber already installed: {0}")]
    Init(String),
}

/// A single failed field in a validated payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level failures collected from one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Whether any failure was recorded for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| {
                if e.field.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.field, e.message)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}
