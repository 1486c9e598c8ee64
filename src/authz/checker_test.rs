// ABOUTME: Tests for the authorization check - default deny, wildcards, denials.
// ABOUTME: Includes proptest properties for default deny and idempotence.

use proptest::prelude::*;

use super::*;
use crate::config::{RbacConfig, RoleConfig};
use crate::principal::{MemoryPrincipalStore, Principal, PrincipalId};
use crate::role::{RoleTable, RoleTableHandle, load};

fn table() -> RoleTable {
    load(&RbacConfig::embedded().unwrap()).unwrap()
}

fn with_roles(roles: &[&str]) -> Principal {
    roles
        .iter()
        .fold(Principal::new(PrincipalId::new()), |p, r| p.with_role(*r))
}

#[test]
fn test_no_roles_is_denied() {
    let table = table();
    let nobody = Principal::new(PrincipalId::new());
    assert_eq!(evaluate(&table, &nobody, "user", "view.me"), Decision::Deny);
    assert_eq!(evaluate(&table, &nobody, "*", "*"), Decision::Deny);
}

#[test]
fn test_administrator_allows_everything() {
    let table = table();
    let admin = with_roles(&["administrator"]);
    assert!(table.can_perform(&admin, "role", "update.all"));
    assert!(table.can_perform(&admin, "invoice", "export.monthly"));
}

#[test]
fn test_exact_match_required() {
    let table = table();
    let user = with_roles(&["user"]);
    assert!(table.can_perform(&user, "user", "view.me"));
    assert!(!table.can_perform(&user, "user", "view.all"));
    assert!(!table.can_perform(&user, "role", "view.all"));
}

#[test]
fn test_resource_wildcard_in_role() {
    let table = table();
    let manager = with_roles(&["manager"]);
    assert!(table.can_perform(&manager, "restaurant", "delete.all"));
    assert!(table.can_perform(&manager, "user", "update.all"));
    assert!(!table.can_perform(&manager, "role", "update.all"));
}

#[test]
fn test_any_role_suffices() {
    let table = table();
    let both = with_roles(&["user", "manager"]);
    assert!(table.can_perform(&both, "user", "update.all"));
    assert!(table.can_perform(&both, "client", "create"));
}

#[test]
fn test_unknown_role_is_ignored() {
    let table = table();
    let ghost = with_roles(&["ghost"]);
    assert_eq!(evaluate(&table, &ghost, "user", "view.me"), Decision::Deny);
}

#[test]
fn test_direct_grant_allows() {
    let table = table();
    let user = with_roles(&["user"]).with_grant("restaurant.update.all");
    assert!(table.can_perform(&user, "restaurant", "update.all"));
    assert!(!table.can_perform(&user, "restaurant", "delete.all"));
}

#[test]
fn test_direct_denial_wins() {
    let table = table();
    let admin = with_roles(&["administrator"]).with_denial("role.update.all");
    assert!(!table.can_perform(&admin, "role", "update.all"));
    assert!(table.can_perform(&admin, "role", "view.all"));

    let both = Principal::new(PrincipalId::new())
        .with_grant("user.view.all")
        .with_denial("user.view.all");
    assert!(!table.can_perform(&both, "user", "view.all"));
}

#[test]
fn test_authorizer_follows_reload() {
    let authorizer = Authorizer::new(RoleTableHandle::from_config(&RbacConfig::embedded().unwrap()).unwrap());
    let user = with_roles(&["user"]);
    assert!(authorizer.is_allowed(&user, "restaurant", "view.all"));

    let narrowed = RbacConfig::new()
        .alias("view-me", "view.me")
        .role(RoleConfig::new("user").resource("user", "view-me"));
    authorizer.tables().reload(&narrowed).unwrap();

    assert!(!authorizer.is_allowed(&user, "restaurant", "view.all"));
    assert!(authorizer.is_allowed(&user, "user", "view.me"));
}

#[tokio::test]
async fn test_check_principal_from_store() {
    let authorizer = Authorizer::new(RoleTableHandle::new(table()));
    let store = MemoryPrincipalStore::new();
    let principal = with_roles(&["restaurant-owner"]);
    let id = principal.id;
    store.insert(principal).await;

    let decision = authorizer
        .check_principal(&store, id, "restaurant", "create")
        .await
        .unwrap();
    assert_eq!(decision, Decision::Allow);

    let missing = authorizer
        .check_principal(&store, PrincipalId::new(), "restaurant", "create")
        .await;
    assert!(missing.is_err());
}

#[test]
fn test_default_authorizer_denies() {
    let authorizer = Authorizer::default();
    let admin = with_roles(&["administrator"]);
    assert_eq!(authorizer.check(&admin, "user", "view.me"), Decision::Deny);
}

proptest! {
    #[test]
    fn prop_no_roles_never_allowed(resource in "[a-z*]{1,12}", permission in "[a-z.*]{1,12}") {
        let table = table();
        let nobody = Principal::new(PrincipalId::new());
        prop_assert_eq!(evaluate(&table, &nobody, &resource, &permission), Decision::Deny);
    }

    #[test]
    fn prop_administrator_always_allowed(resource in "[a-z]{1,12}", permission in "[a-z.]{1,12}") {
        let table = table();
        let admin = with_roles(&["administrator"]);
        prop_assert!(table.can_perform(&admin, &resource, &permission));
    }

    #[test]
    fn prop_check_is_idempotent(
        role in prop::sample::select(vec!["administrator", "manager", "restaurant-owner", "user", "ghost"]),
        resource in prop::sample::select(vec!["user", "role", "client", "restaurant", "other"]),
        permission in prop::sample::select(vec!["create", "view.me", "view.all", "update.me", "update.all", "delete.all"]),
    ) {
        let authorizer = Authorizer::new(RoleTableHandle::new(table()));
        let principal = with_roles(&[role]);
        let first = authorizer.check(&principal, resource, permission);
        for _ in 0..5 {
            prop_assert_eq!(authorizer.check(&principal, resource, permission), first);
        }
    }
}
