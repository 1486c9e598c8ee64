// ABOUTME: Tests for MemoryPrincipalStore - lookups, mutations, seeding.
// ABOUTME: Seeding is validated against a loaded role table.

use uuid::Uuid;

use super::*;
use crate::config::{PrincipalSeed, RbacConfig};
use crate::error::{ConfigError, StoreError};
use crate::role::load;

#[tokio::test]
async fn test_insert_and_fetch() {
    let store = MemoryPrincipalStore::new();
    let principal = Principal::new(PrincipalId::new()).with_role("user");
    store.insert(principal.clone()).await;

    let fetched = store.roles_and_permissions(principal.id).await.unwrap();
    assert_eq!(fetched, principal);
}

#[tokio::test]
async fn test_missing_principal() {
    let store = MemoryPrincipalStore::new();
    let id = PrincipalId::new();
    let err = store.roles_and_permissions(id).await.unwrap_err();
    assert!(matches!(err, StoreError::PrincipalNotFound(u) if u == id.0));
}

#[tokio::test]
async fn test_assign_and_remove_role() {
    let store = MemoryPrincipalStore::new();
    let id = PrincipalId::new();
    store.insert(Principal::new(id)).await;

    assert!(store.assign_role(id, "manager").await);
    assert!(store.roles_and_permissions(id).await.unwrap().has_role("manager"));

    assert!(store.remove_role(id, "manager").await);
    assert!(!store.roles_and_permissions(id).await.unwrap().has_role("manager"));

    assert!(!store.assign_role(PrincipalId::new(), "manager").await);
}

#[tokio::test]
async fn test_grant_and_deny() {
    let store = MemoryPrincipalStore::new();
    let id = PrincipalId::new();
    store.insert(Principal::new(id)).await;

    store.grant(id, "restaurant.update.all").await;
    store.deny(id, "user.view.me").await;

    let principal = store.roles_and_permissions(id).await.unwrap();
    assert!(principal.has_direct_grant("restaurant.update.all"));
    assert!(principal.has_direct_denial("user.view.me"));
    assert!(!principal.has_direct_grant("user.view.me"));
}

#[tokio::test]
async fn test_clone_shares_state() {
    let store = MemoryPrincipalStore::new();
    let clone = store.clone();
    store.insert(Principal::new(PrincipalId::new())).await;
    assert_eq!(clone.count().await, 1);
}

#[tokio::test]
async fn test_seeded_from_config() {
    let id = Uuid::new_v4();
    let config = RbacConfig::embedded().unwrap().principal(
        PrincipalSeed::new(id)
            .role("user")
            .grant("restaurant.update.all")
            .deny("client.create"),
    );
    let table = load(&config).unwrap();
    let store = MemoryPrincipalStore::seeded(&config, &table).await.unwrap();

    let principal = store
        .roles_and_permissions(PrincipalId(id))
        .await
        .unwrap();
    assert!(principal.has_role("user"));
    assert!(principal.grants.contains("restaurant.update.all"));
    assert!(principal.denials.contains("client.create"));
}

#[tokio::test]
async fn test_seed_with_unknown_role() {
    let config = RbacConfig::embedded()
        .unwrap()
        .principal(PrincipalSeed::new(Uuid::new_v4()).role("superuser"));
    let table = load(&config).unwrap();
    let err = MemoryPrincipalStore::seeded(&config, &table)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::UnknownRole(ref r) if r == "superuser"));
}

#[tokio::test]
async fn test_seed_with_unqualified_grant() {
    let config = RbacConfig::embedded()
        .unwrap()
        .principal(PrincipalSeed::new(Uuid::new_v4()).grant("update"));
    let table = load(&config).unwrap();
    let err = MemoryPrincipalStore::seeded(&config, &table)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::InvalidName { kind: "qualified permission", .. }));
}

#[tokio::test]
async fn test_seed_rejects_wildcard_segments() {
    for name in ["role.*", "*.*", "*.update.all", "role.update.*"] {
        let config = RbacConfig::embedded()
            .unwrap()
            .principal(PrincipalSeed::new(Uuid::new_v4()).role("administrator").deny(name));
        let table = load(&config).unwrap();
        let err = MemoryPrincipalStore::seeded(&config, &table)
            .await
            .err()
            .unwrap();
        assert!(
            matches!(err, ConfigError::InvalidName { kind: "qualified permission", .. }),
            "{name} should be rejected"
        );
    }
}
