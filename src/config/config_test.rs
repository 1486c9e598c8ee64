// ABOUTME: Tests for RbacConfig - parsing, builders and source selection.
// ABOUTME: Uses tempfile for on-disk configuration files.

use std::io::Write;
use std::path::Path;

use super::*;
use crate::error::ConfigError;

#[test]
fn test_embedded_defaults_parse() {
    let config = RbacConfig::embedded().unwrap();
    let names: Vec<_> = config.roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["administrator", "manager", "restaurant-owner", "user"]
    );
    assert_eq!(config.permissions.get("view-me"), Some(&"view.me".to_string()));

    let admin = &config.roles[0];
    assert_eq!(admin.resources.get("*"), Some(&AliasList::from("*")));
}

#[test]
fn test_alias_list_forms() {
    let joined = AliasList::from(" view-me, update-me ,,");
    assert_eq!(joined.aliases(), vec!["view-me", "update-me"]);

    let list = AliasList::from(vec!["create", " view-all "]);
    assert_eq!(list.aliases(), vec!["create", "view-all"]);
}

#[test]
fn test_toml_with_list_and_principals() {
    let toml = r#"
        [permissions]
        view-me = "view.me"

        [[roles]]
        name = "user"
        [roles.resources]
        user = ["view-me"]

        [[principals]]
        id = "6f1c1c5e-0b7a-4f0e-9d59-3d7d2f6b7d11"
        roles = ["user"]
        denials = ["user.view.me"]
    "#;
    let config = RbacConfig::from_toml_str(toml).unwrap();
    assert_eq!(
        config.roles[0].resources["user"],
        AliasList::List(vec!["view-me".into()])
    );
    assert_eq!(config.principals.len(), 1);
    assert_eq!(config.principals[0].denials, vec!["user.view.me"]);
    assert!(config.principals[0].grants.is_empty());
}

#[test]
fn test_json_config() {
    let json = r#"{
        "permissions": { "create": "create" },
        "roles": [ { "name": "writer", "resources": { "post": "create" } } ]
    }"#;
    let config = RbacConfig::from_json_str(json).unwrap();
    assert_eq!(config.roles[0].name, "writer");
    assert!(config.principals.is_empty());
}

#[test]
fn test_builder_matches_parsed() {
    let built = RbacConfig::new()
        .alias("view-me", "view.me")
        .role(RoleConfig::new("user").resource("user", "view-me"));
    let parsed = RbacConfig::from_toml_str(
        r#"
        [permissions]
        view-me = "view.me"
        [[roles]]
        name = "user"
        [roles.resources]
        user = "view-me"
        "#,
    )
    .unwrap();
    assert_eq!(built, parsed);
}

#[test]
fn test_from_path_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("roles.toml");
    let mut file = std::fs::File::create(&toml_path).unwrap();
    writeln!(file, "[permissions]\ncreate = \"create\"").unwrap();
    let config = RbacConfig::from_path(&toml_path).unwrap();
    assert_eq!(config.permissions.len(), 1);

    let yaml_path = dir.path().join("roles.yaml");
    std::fs::write(&yaml_path, "permissions: {}").unwrap();
    let err = RbacConfig::from_path(&yaml_path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "yaml"));
}

#[test]
fn test_from_path_missing_file() {
    let err = RbacConfig::from_path(Path::new("/nonexistent/roles.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_toml() {
    let err = RbacConfig::from_toml_str("[[roles]\nname = ").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_select_source_precedence() {
    let explicit = Path::new("/etc/rolegate/roles.toml");
    assert_eq!(
        select_source(Some(explicit), Some("/tmp/other.toml")),
        ConfigSource::File(explicit.to_path_buf())
    );
    assert_eq!(
        select_source(None, Some("/tmp/other.toml")),
        ConfigSource::File("/tmp/other.toml".into())
    );
    assert_eq!(select_source(None, Some("  ")), ConfigSource::Embedded);
    assert_eq!(select_source(None, None), ConfigSource::Embedded);
}
