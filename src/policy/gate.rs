// ABOUTME: Gate and ResourcePolicy - the "me vs all" policy functions.
// ABOUTME: Unauthenticated actors are always refused.

use tracing::debug;

use super::{Ability, Owned, Resource, Scope};
use crate::authz::CapabilityCheck;
use crate::error::AccessError;
use crate::principal::{Actor, PrincipalId};

/// Policy decisions for one resource.
pub struct ResourcePolicy<'a, C: ?Sized> {
    checker: &'a C,
    resource: &'a str,
}

impl<'a, C: CapabilityCheck + ?Sized> ResourcePolicy<'a, C> {
    pub fn new(checker: &'a C, resource: &'a str) -> Self {
        Self { checker, resource }
    }

    pub fn resource(&self) -> &str {
        self.resource
    }

    /// Decide `ability` for `actor` on a record owned by `owner`.
    ///
    /// Scoped abilities pass with the `me` permission when the actor owns
    /// the record, or with the `all` permission regardless of owner.
    /// `owner == None` means the record has no owner, so only `all` applies.
    pub fn allows(
        &self,
        actor: Option<&dyn Actor>,
        ability: Ability,
        owner: Option<PrincipalId>,
    ) -> bool {
        let Some(actor) = actor else {
            return false;
        };

        if !ability.is_scoped() {
            return self.can(actor, &ability.permission(Scope::All));
        }

        let owns = owner.is_some_and(|owner| owner == actor.id());
        (owns && self.can(actor, &ability.permission(Scope::Me)))
            || self.can(actor, &ability.permission(Scope::All))
    }

    pub fn view_any(&self, actor: Option<&dyn Actor>) -> bool {
        self.allows(actor, Ability::ViewAny, None)
    }

    pub fn view(&self, actor: Option<&dyn Actor>, owner: Option<PrincipalId>) -> bool {
        self.allows(actor, Ability::View, owner)
    }

    pub fn create(&self, actor: Option<&dyn Actor>) -> bool {
        self.allows(actor, Ability::Create, None)
    }

    pub fn update(&self, actor: Option<&dyn Actor>, owner: Option<PrincipalId>) -> bool {
        self.allows(actor, Ability::Update, owner)
    }

    pub fn delete(&self, actor: Option<&dyn Actor>, owner: Option<PrincipalId>) -> bool {
        self.allows(actor, Ability::Delete, owner)
    }

    /// Like [`allows`](Self::allows), but says why a request is refused.
    pub fn authorize(
        &self,
        actor: Option<&dyn Actor>,
        ability: Ability,
        owner: Option<PrincipalId>,
    ) -> Result<(), AccessError> {
        let Some(who) = actor else {
            return Err(AccessError::Unauthenticated);
        };
        if self.allows(actor, ability, owner) {
            return Ok(());
        }
        debug!(principal = %who.id(), resource = self.resource, %ability, "forbidden");
        Err(AccessError::Forbidden {
            resource: self.resource.to_string(),
            ability: ability.to_string(),
        })
    }

    fn can(&self, actor: &dyn Actor, permission: &str) -> bool {
        self.checker.can_perform(actor, self.resource, permission)
    }
}

/// Entry point for policy decisions on domain records.
pub struct Gate<C> {
    checker: C,
}

impl<C: CapabilityCheck> Gate<C> {
    pub fn new(checker: C) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    /// Policy for an arbitrary resource name.
    pub fn policy<'a>(&'a self, resource: &'a str) -> ResourcePolicy<'a, C> {
        ResourcePolicy::new(&self.checker, resource)
    }

    pub fn view_any(&self, actor: Option<&dyn Actor>, resource: Resource) -> bool {
        self.policy(resource.as_str()).view_any(actor)
    }

    pub fn view(&self, actor: Option<&dyn Actor>, subject: &dyn Owned) -> bool {
        self.policy(subject.resource().as_str())
            .view(actor, subject.owner_id())
    }

    pub fn create(&self, actor: Option<&dyn Actor>, resource: Resource) -> bool {
        self.policy(resource.as_str()).create(actor)
    }

    pub fn update(&self, actor: Option<&dyn Actor>, subject: &dyn Owned) -> bool {
        self.policy(subject.resource().as_str())
            .update(actor, subject.owner_id())
    }

    pub fn delete(&self, actor: Option<&dyn Actor>, subject: &dyn Owned) -> bool {
        self.policy(subject.resource().as_str())
            .delete(actor, subject.owner_id())
    }

    /// Enforce `ability` on `subject`.
    pub fn authorize(
        &self,
        actor: Option<&dyn Actor>,
        ability: Ability,
        subject: &dyn Owned,
    ) -> Result<(), AccessError> {
        self.policy(subject.resource().as_str())
            .authorize(actor, ability, subject.owner_id())
    }
}
