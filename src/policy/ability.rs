// ABOUTME: Ability, Scope and Resource - typed names for policy checks.
// ABOUTME: Render to the canonical permission strings stored in role tables.

use std::fmt;

/// Whether a permission covers only the actor's own records or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Me,
    All,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Me => "me",
            Scope::All => "all",
        }
    }
}

/// An action a policy can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    /// List records; needs the all-scoped view permission.
    ViewAny,
    View,
    Create,
    Update,
    Delete,
}

impl Ability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::ViewAny => "view-any",
            Ability::View => "view",
            Ability::Create => "create",
            Ability::Update => "update",
            Ability::Delete => "delete",
        }
    }

    /// Whether the ability distinguishes own records from all records.
    pub fn is_scoped(&self) -> bool {
        matches!(self, Ability::View | Ability::Update | Ability::Delete)
    }

    /// Canonical permission for this ability in `scope`.
    ///
    /// `Create` is unscoped and `ViewAny` is always `view.all`.
    pub fn permission(&self, scope: Scope) -> String {
        match self {
            Ability::Create => "create".to_string(),
            Ability::ViewAny => format!("view.{}", Scope::All.as_str()),
            Ability::View | Ability::Update | Ability::Delete => {
                format!("{}.{}", self.as_str(), scope.as_str())
            }
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Role,
    Client,
    Restaurant,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Role => "role",
            Resource::Client => "client",
            Resource::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
