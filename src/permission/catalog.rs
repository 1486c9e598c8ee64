// ABOUTME: Defines the permission catalog - alias to canonical permission mapping.
// ABOUTME: Validates names and resolves aliases, with `*` as a built-in passthrough.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

/// The wildcard token, valid as an alias, a canonical permission and a resource key.
pub const WILDCARD: &str = "*";

static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("alias pattern is valid"));

static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_-]*(\.[a-z][a-z0-9_-]*)*$").expect("canonical pattern is valid")
});

/// A resolved permission, as stored in a role's resource entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalPermission {
    /// Matches any permission on the resource.
    Any,
    /// A single named permission such as `view.me`.
    Named(String),
}

impl CanonicalPermission {
    /// Whether this permission satisfies a request for `permission`.
    pub fn grants(&self, permission: &str) -> bool {
        match self {
            CanonicalPermission::Any => true,
            CanonicalPermission::Named(name) => name == permission,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CanonicalPermission::Any => WILDCARD,
            CanonicalPermission::Named(name) => name,
        }
    }
}

impl fmt::Display for CanonicalPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully qualified permission name checked for a resource, e.g. `user.view.me`.
pub fn qualified(resource: &str, permission: &str) -> String {
    format!("{resource}.{permission}")
}

/// Whether `name` is a well-formed resource or role identifier.
pub fn is_identifier(name: &str) -> bool {
    ALIAS_RE.is_match(name)
}

/// Immutable mapping from short aliases to canonical permissions.
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    entries: BTreeMap<String, CanonicalPermission>,
}

impl PermissionCatalog {
    /// Build a catalog from alias/canonical pairs, validating both sides.
    pub fn from_pairs<I, A, C>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let mut entries = BTreeMap::new();
        for (alias, canonical) in pairs {
            let alias = alias.as_ref().trim();
            let canonical = canonical.as_ref().trim();

            if alias != WILDCARD && !ALIAS_RE.is_match(alias) {
                return Err(ConfigError::InvalidName {
                    kind: "permission alias",
                    name: alias.to_string(),
                });
            }

            if alias == WILDCARD && canonical != WILDCARD {
                return Err(ConfigError::InvalidName {
                    kind: "permission alias",
                    name: format!("{alias} = {canonical}"),
                });
            }

            let resolved = if canonical == WILDCARD {
                CanonicalPermission::Any
            } else if CANONICAL_RE.is_match(canonical) {
                CanonicalPermission::Named(canonical.to_string())
            } else {
                return Err(ConfigError::InvalidName {
                    kind: "canonical permission",
                    name: canonical.to_string(),
                });
            };

            entries.insert(alias.to_string(), resolved);
        }
        Ok(Self { entries })
    }

    /// Resolve an alias to its canonical permission.
    ///
    /// `*` always resolves to [`CanonicalPermission::Any`], listed or not.
    pub fn resolve(&self, alias: &str) -> Result<CanonicalPermission, ConfigError> {
        if alias == WILDCARD {
            return Ok(CanonicalPermission::Any);
        }
        self.entries
            .get(alias)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownPermissionAlias(alias.to_string()))
    }

    pub fn contains(&self, alias: &str) -> bool {
        alias == WILDCARD || self.entries.contains_key(alias)
    }

    /// All aliases, sorted.
    pub fn aliases(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
