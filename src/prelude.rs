// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use rolegate::prelude::*;` to get started quickly.

pub use crate::authz::{Authorizer, CapabilityCheck, Decision, evaluate};
pub use crate::config::{AliasList, ConfigSource, PrincipalSeed, RbacConfig, RoleConfig};
pub use crate::error::{
    AccessError, ConfigError, FieldError, RolegateError, StoreError, TelemetryError,
    ValidationErrors,
};
pub use crate::permission::{CanonicalPermission, PermissionCatalog, WILDCARD, qualified};
pub use crate::policy::{
    Ability, Gate, OauthClient, Owned, Resource, ResourcePolicy, Restaurant, RoleRecord, Scope,
    User,
};
pub use crate::principal::{Actor, MemoryPrincipalStore, Principal, PrincipalId, PrincipalStore};
pub use crate::role::{RoleDefinition, RoleTable, RoleTableHandle, load};
pub use crate::telemetry::{LogConfig, LogFormat, setup_logging};
pub use crate::transform::{Transform, Visibility};
pub use crate::validation::{
    CreateClient, CreateRestaurant, CreateRole, CreateUser, PageParams, UpdateRestaurant,
    UpdateUser, validate_payload,
};
