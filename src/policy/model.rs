// ABOUTME: Domain records that policies decide about.
// ABOUTME: Each record names its resource and, if any, its owning principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Resource;
use crate::principal::PrincipalId;
use crate::role::RoleDefinition;

/// A record subject to a policy.
pub trait Owned {
    fn resource(&self) -> Resource;

    /// The principal that counts as "me" for this record, if any.
    fn owner_id(&self) -> Option<PrincipalId>;
}

/// A registered account. Its owner is itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: PrincipalId,
    pub name: String,
    pub email: String,
}

impl Owned for User {
    fn resource(&self) -> Resource {
        Resource::User
    }

    fn owner_id(&self) -> Option<PrincipalId> {
        Some(self.id)
    }
}

/// A restaurant managed by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: PrincipalId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Owned for Restaurant {
    fn resource(&self) -> Resource {
        Resource::Restaurant
    }

    fn owner_id(&self) -> Option<PrincipalId> {
        Some(self.owner_id)
    }
}

/// An OAuth client. First-party clients have no owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OauthClient {
    pub id: Uuid,
    pub user_id: Option<PrincipalId>,
    pub name: String,
    pub redirect: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub personal_access_client: bool,
    pub revoked: bool,
}

impl Owned for OauthClient {
    fn resource(&self) -> Resource {
        Resource::Client
    }

    fn owner_id(&self) -> Option<PrincipalId> {
        self.user_id
    }
}

/// A role as exposed to callers. Roles have no owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

impl From<&RoleDefinition> for RoleRecord {
    fn from(definition: &RoleDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            display_name: definition.display_name.clone(),
            description: definition.description.clone(),
        }
    }
}

impl Owned for RoleRecord {
    fn resource(&self) -> Resource {
        Resource::Role
    }

    fn owner_id(&self) -> Option<PrincipalId> {
        None
    }
}
