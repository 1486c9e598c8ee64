// ABOUTME: Tests for PermissionCatalog - alias resolution and name validation.
// ABOUTME: Covers the wildcard passthrough and unknown-alias failures.

use super::*;
use crate::error::ConfigError;

fn catalog() -> PermissionCatalog {
    PermissionCatalog::from_pairs([
        ("create", "create"),
        ("view-me", "view.me"),
        ("view-all", "view.all"),
    ])
    .unwrap()
}

#[test]
fn test_resolve_known_alias() {
    let catalog = catalog();
    assert_eq!(
        catalog.resolve("view-me").unwrap(),
        CanonicalPermission::Named("view.me".into())
    );
    assert_eq!(
        catalog.resolve("create").unwrap(),
        CanonicalPermission::Named("create".into())
    );
}

#[test]
fn test_resolve_wildcard_without_entry() {
    let catalog = catalog();
    assert!(!catalog.aliases().contains(&"*"));
    assert_eq!(catalog.resolve("*").unwrap(), CanonicalPermission::Any);
    assert!(catalog.contains("*"));
}

#[test]
fn test_resolve_unknown_alias() {
    let err = catalog().resolve("delete-all").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPermissionAlias(ref a) if a == "delete-all"));
}

#[test]
fn test_wildcard_canonical() {
    let catalog = PermissionCatalog::from_pairs([("all", "*")]).unwrap();
    assert_eq!(catalog.resolve("all").unwrap(), CanonicalPermission::Any);
}

#[test]
fn test_invalid_alias_rejected() {
    let err = PermissionCatalog::from_pairs([("View Me", "view.me")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidName {
            kind: "permission alias",
            ..
        }
    ));
}

#[test]
fn test_wildcard_alias_only_maps_to_wildcard() {
    let catalog = PermissionCatalog::from_pairs([("*", "*")]).unwrap();
    assert_eq!(catalog.resolve("*").unwrap(), CanonicalPermission::Any);

    let err = PermissionCatalog::from_pairs([("*", "view.all")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidName {
            kind: "permission alias",
            ..
        }
    ));
}

#[test]
fn test_invalid_canonical_rejected() {
    let err = PermissionCatalog::from_pairs([("view-me", "view..me")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidName {
            kind: "canonical permission",
            ..
        }
    ));
}

#[test]
fn test_grants() {
    assert!(CanonicalPermission::Any.grants("update.all"));
    let view_me = CanonicalPermission::Named("view.me".into());
    assert!(view_me.grants("view.me"));
    assert!(!view_me.grants("view.all"));
}

#[test]
fn test_qualified() {
    assert_eq!(qualified("user", "view.me"), "user.view.me");
}
