//! Package-name mapping registries.
//!
//! The primary registry translates a package identifier into a concrete,
//! platform-specific package name through a set of lookup keys. A key can
//! also map to an explicit [`Resolution::Absent`] marker, meaning "not
//! needed on platforms matching this key"; absence is a first-class variant
//! here, never a sentinel. The two ecosystem registries (PyPI and CPAN)
//! recognize a single `default` key each.
//!
//! Keys are unordered in storage. Lookup order is imposed by the chains in
//! [`crate::keychain`], and is last-match-wins: a more specific key later in
//! the chain overrides whatever a more general key chose, including
//! overriding a concrete name with an absent marker.

pub mod yaml;

use std::{collections::BTreeMap, sync::OnceLock};

use regex::Regex;
use thiserror::Error;

use crate::cross::CrossPolicy;

/// Prefix of the keys that carry a cross policy instead of a package name.
pub const POLICY_PREFIX: &str = "cross-policy-";

/// Outcome of resolving a key chain against one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No key in the chain is present in the entry.
    Unmatched,
    /// The winning key maps to the explicit "not needed here" marker.
    Absent,
    /// The winning key maps to a concrete package name.
    Name(String),
}

impl Resolution {
    #[must_use]
    pub fn into_name(self) -> Option<String> {
        match self {
            Resolution::Name(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Malformed mapping key `{key}` for {package}")]
    MalformedKey { package: String, key: String },

    #[error("Duplicate mapping key `{key}` for {package}")]
    DuplicateKey { package: String, key: String },

    #[error("Unexpected cross arch policy {value} for {package}")]
    InvalidPolicy { package: String, value: String },

    #[error("Cross policy key `{key}` for {package} must not be null")]
    NullPolicy { package: String, key: String },

    #[error("Unknown key `{key}` for {package} in the {registry} registry")]
    UnknownEcosystemKey {
        registry: String,
        package: String,
        key: String,
    },
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.+-]*$").expect("static pattern compiles")
    })
}

/// The per-package mapping from lookup key to name or absent marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingEntry {
    pairs: Vec<(String, Option<String>)>,
}

impl MappingEntry {
    /// Build an entry from raw (key, optional-name) pairs, validating key
    /// well-formedness and cross-policy values up front so lookups never
    /// have to.
    pub fn from_pairs<I, K, V>(package: &str, pairs: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entry = Self { pairs: Vec::new() };

        for (key, value) in pairs {
            let key = key.into();
            let value = value.map(Into::into);

            if !key_pattern().is_match(&key) {
                return Err(MappingError::MalformedKey {
                    package: package.to_string(),
                    key,
                });
            }

            if entry.pairs.iter().any(|(k, _)| *k == key) {
                return Err(MappingError::DuplicateKey {
                    package: package.to_string(),
                    key,
                });
            }

            if key.starts_with(POLICY_PREFIX) {
                match &value {
                    None => {
                        return Err(MappingError::NullPolicy {
                            package: package.to_string(),
                            key,
                        });
                    }
                    Some(policy) if policy.parse::<CrossPolicy>().is_err() => {
                        return Err(MappingError::InvalidPolicy {
                            package: package.to_string(),
                            value: policy.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }

            entry.pairs.push((key, value));
        }

        Ok(entry)
    }

    /// Look up a single key. The outer `Option` is "key present", the inner
    /// one distinguishes a name from the absent marker.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Option<&str>> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Resolve a key chain against this entry, last match wins.
    #[must_use]
    pub fn resolve(&self, chain: &[String]) -> Resolution {
        let mut resolution = Resolution::Unmatched;

        for key in chain {
            if let Some(value) = self.lookup(key) {
                resolution = match value {
                    Some(name) => Resolution::Name(name.to_string()),
                    None => Resolution::Absent,
                };
            }
        }

        resolution
    }
}

/// The primary (system package) registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, MappingEntry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: impl Into<String>, entry: MappingEntry) {
        self.entries.insert(package.into(), entry);
    }

    #[must_use]
    pub fn get(&self, package: &str) -> Option<&MappingEntry> {
        self.entries.get(package)
    }

    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An auxiliary registry with a single recognized key, `default`.
#[derive(Debug, Clone, Default)]
pub struct EcosystemRegistry {
    entries: BTreeMap<String, Option<String>>,
}

impl EcosystemRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, package: impl Into<String>, default: Option<String>) {
        self.entries.insert(package.into(), default);
    }

    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    /// Resolve a package through the single `default` key.
    #[must_use]
    pub fn resolve(&self, package: &str) -> Resolution {
        match self.entries.get(package) {
            None => Resolution::Unmatched,
            Some(None) => Resolution::Absent,
            Some(Some(name)) => Resolution::Name(name.clone()),
        }
    }
}

/// The three registries a resolution works against.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    primary: Registry,
    pypi: EcosystemRegistry,
    cpan: EcosystemRegistry,
}

impl Mappings {
    #[must_use]
    pub fn new(primary: Registry, pypi: EcosystemRegistry, cpan: EcosystemRegistry) -> Self {
        Self {
            primary,
            pypi,
            cpan,
        }
    }

    #[must_use]
    pub fn primary(&self) -> &Registry {
        &self.primary
    }

    #[must_use]
    pub fn pypi(&self) -> &EcosystemRegistry {
        &self.pypi
    }

    #[must_use]
    pub fn cpan(&self) -> &EcosystemRegistry {
        &self.cpan
    }

    /// Whether any of the three registries knows this package.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.primary.contains(package)
            || self.pypi.contains(package)
            || self.cpan.contains(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(pairs: &[(&str, Option<&str>)]) -> MappingEntry {
        MappingEntry::from_pairs("test-package", pairs.iter().cloned()).unwrap()
    }

    #[test]
    fn last_match_in_the_chain_wins() {
        let entry = entry(&[("default", Some("a")), ("Debian", Some("b"))]);
        let chain = vec!["default".to_string(), "Debian".to_string()];

        assert_eq!(entry.resolve(&chain), Resolution::Name("b".to_string()));
    }

    #[test]
    fn later_null_overrides_earlier_name() {
        let entry = entry(&[("default", Some("a")), ("Debian", None)]);
        let chain = vec!["default".to_string(), "Debian".to_string()];

        assert_eq!(entry.resolve(&chain), Resolution::Absent);
    }

    #[test]
    fn chain_with_no_present_key_is_unmatched() {
        let entry = entry(&[("rpm", Some("a"))]);
        let chain = vec!["default".to_string(), "deb".to_string()];

        assert_eq!(entry.resolve(&chain), Resolution::Unmatched);
    }

    #[test]
    fn storage_order_of_keys_is_irrelevant() {
        let forward = entry(&[("default", Some("a")), ("Debian", Some("b"))]);
        let backward = entry(&[("Debian", Some("b")), ("default", Some("a"))]);
        let chain = vec!["default".to_string(), "Debian".to_string()];

        assert_eq!(forward.resolve(&chain), backward.resolve(&chain));
    }

    #[test]
    fn malformed_key_is_rejected_at_construction() {
        let result = MappingEntry::from_pairs("pkg", vec![("bad key", Some("x"))]);
        assert_eq!(
            result.unwrap_err(),
            MappingError::MalformedKey {
                package: "pkg".to_string(),
                key: "bad key".to_string()
            }
        );
    }

    #[test]
    fn duplicate_key_is_rejected_at_construction() {
        let result =
            MappingEntry::from_pairs("pkg", vec![("default", Some("x")), ("default", Some("y"))]);
        assert!(matches!(
            result.unwrap_err(),
            MappingError::DuplicateKey { .. }
        ));
    }

    #[test]
    fn policy_keys_must_carry_a_valid_policy() {
        let result =
            MappingEntry::from_pairs("pkg", vec![("cross-policy-default", Some("sometimes"))]);
        assert_eq!(
            result.unwrap_err(),
            MappingError::InvalidPolicy {
                package: "pkg".to_string(),
                value: "sometimes".to_string()
            }
        );

        let result =
            MappingEntry::from_pairs("pkg", vec![("cross-policy-default", None::<&str>)]);
        assert!(matches!(result.unwrap_err(), MappingError::NullPolicy { .. }));
    }

    #[test]
    fn ecosystem_registry_distinguishes_absent_from_unmatched() {
        let mut registry = EcosystemRegistry::new();
        registry.insert("meson", Some("meson".to_string()));
        registry.insert("not-on-pypi", None);

        assert_eq!(
            registry.resolve("meson"),
            Resolution::Name("meson".to_string())
        );
        assert_eq!(registry.resolve("not-on-pypi"), Resolution::Absent);
        assert_eq!(registry.resolve("unknown"), Resolution::Unmatched);
    }

    #[test]
    fn mappings_contains_searches_all_three_registries() {
        let mut primary = Registry::new();
        primary.insert("gcc", entry(&[("default", Some("gcc"))]));

        let mut pypi = EcosystemRegistry::new();
        pypi.insert("meson", Some("meson".to_string()));

        let mut cpan = EcosystemRegistry::new();
        cpan.insert("perl-yaml", Some("YAML".to_string()));

        let mappings = Mappings::new(primary, pypi, cpan);

        assert!(mappings.contains("gcc"));
        assert!(mappings.contains("meson"));
        assert!(mappings.contains("perl-yaml"));
        assert!(!mappings.contains("unknown"));
    }
}
