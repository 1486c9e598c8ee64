// ABOUTME: Visibility levels and the Transform trait for domain records.
// ABOUTME: Gate::present decides visibility and renders the record.

use serde_json::{Value, json};

use crate::authz::CapabilityCheck;
use crate::policy::{Ability, Gate, OauthClient, Owned, Restaurant, RoleRecord, Scope, User};
use crate::principal::Actor;

/// How much of a record an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    /// Allowed to view, but neither owner nor manager of the record.
    Public,
    /// Owns the record.
    Owner,
    /// Holds the all-scoped update permission on the resource.
    Full,
}

/// Renders a record to JSON for a given visibility.
pub trait Transform: Owned {
    fn transform(&self, visibility: Visibility) -> Value;
}

impl Transform for User {
    fn transform(&self, visibility: Visibility) -> Value {
        let mut out = json!({
            "id": self.id,
            "name": self.name,
        });
        if visibility >= Visibility::Owner {
            out["email"] = json!(self.email);
        }
        out
    }
}

impl Transform for Restaurant {
    fn transform(&self, visibility: Visibility) -> Value {
        let mut out = json!({
            "id": self.id,
            "name": self.name,
            "address": self.address,
            "phone": self.phone,
        });
        if visibility >= Visibility::Owner {
            out["owner_id"] = json!(self.owner_id);
        }
        out
    }
}

impl Transform for OauthClient {
    fn transform(&self, visibility: Visibility) -> Value {
        let mut out = json!({
            "id": self.id,
            "name": self.name,
        });
        if visibility >= Visibility::Owner {
            out["redirect"] = json!(self.redirect);
            out["revoked"] = json!(self.revoked);
        }
        if visibility == Visibility::Full {
            out["user_id"] = json!(self.user_id);
            out["personal_access_client"] = json!(self.personal_access_client);
        }
        out
    }
}

impl Transform for RoleRecord {
    fn transform(&self, _visibility: Visibility) -> Value {
        json!({
            "name": self.name,
            "display_name": self.display_name,
            "description": self.description,
        })
    }
}

impl<C: CapabilityCheck> Gate<C> {
    /// Visibility of `subject` for `actor`, or `None` if it may not be viewed.
    pub fn visibility(&self, actor: Option<&dyn Actor>, subject: &dyn Owned) -> Option<Visibility> {
        let who = actor?;
        if !self.view(actor, subject) {
            return None;
        }

        let resource = subject.resource().as_str();
        let manages = self
            .checker()
            .can_perform(who, resource, &Ability::Update.permission(Scope::All));
        if manages {
            return Some(Visibility::Full);
        }
        if subject.owner_id().is_some_and(|owner| owner == who.id()) {
            return Some(Visibility::Owner);
        }
        Some(Visibility::Public)
    }

    /// Render `subject` if `actor` may view it.
    pub fn present<T: Transform>(&self, actor: Option<&dyn Actor>, subject: &T) -> Option<Value> {
        self.visibility(actor, subject)
            .map(|visibility| subject.transform(visibility))
    }

    /// Render every viewable record, dropping the rest.
    pub fn present_all<T: Transform>(&self, actor: Option<&dyn Actor>, subjects: &[T]) -> Vec<Value> {
        subjects
            .iter()
            .filter_map(|subject| self.present(actor, subject))
            .collect()
    }
}
