//! Construction of the ordered lookup-key chains.
//!
//! Every chain runs from the most general key to the most specific one, and
//! resolution against a [`crate::mapping::MappingEntry`] is last-match-wins,
//! so the specific keys override the general ones. Each builder is a pure
//! function of the facts (and cross target) so the per-format rules stay
//! independently testable.

use crate::{
    facts::{Facts, PackagingFormat},
    mapping::POLICY_PREFIX,
};

/// `default`, packaging format, OS name, OS name + version.
#[must_use]
pub fn base_keys(facts: &Facts) -> Vec<String> {
    vec![
        "default".to_string(),
        facts.packaging_format().to_string(),
        facts.os_name().to_string(),
        format!("{}{}", facts.os_name(), facts.os_version()),
    ]
}

/// Chain for native package names: base keys, then the same keys prefixed
/// with the native architecture.
#[must_use]
pub fn native_keys(facts: &Facts) -> Vec<String> {
    let base = base_keys(facts);
    let mut keys = base.clone();
    keys.extend(prefixed(facts.native_arch(), &base));
    keys
}

/// Chain for foreign package names in a cross build.
///
/// For `deb` the foreign name usually equals the native one with occasional
/// architecture-specific overrides, so the unprefixed keys stay in the
/// chain. For `rpm` the foreign names are unrelated to the native ones;
/// including unprefixed keys would pull in native packages, so only the
/// prefixed keys are used. Other formats never reach this point: the cross
/// preflight rejects them first.
#[must_use]
pub fn foreign_keys(facts: &Facts, cross_arch: &str) -> Vec<String> {
    let base = base_keys(facts);

    match facts.packaging_format() {
        PackagingFormat::Deb => {
            let mut keys = base.clone();
            keys.extend(prefixed(cross_arch, &base));
            keys
        }
        PackagingFormat::Rpm => prefixed(cross_arch, &base),
        PackagingFormat::Other => Vec::new(),
    }
}

/// Chain for cross-policy lookups; never used for package names.
#[must_use]
pub fn policy_keys(facts: &Facts) -> Vec<String> {
    base_keys(facts)
        .iter()
        .map(|key| format!("{POLICY_PREFIX}{key}"))
        .collect()
}

fn prefixed(arch: &str, keys: &[String]) -> Vec<String> {
    keys.iter().map(|key| format!("{arch}-{key}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactsBuilder;
    use pretty_assertions::assert_eq;

    fn debian() -> Facts {
        FactsBuilder::default()
            .os("Debian", "11")
            .packaging(PackagingFormat::Deb, "apt-get")
            .native_arch("x86_64")
            .build()
    }

    fn fedora() -> Facts {
        FactsBuilder::default()
            .os("Fedora", "35")
            .packaging(PackagingFormat::Rpm, "dnf")
            .native_arch("x86_64")
            .build()
    }

    #[test]
    fn base_keys_run_general_to_specific() {
        assert_eq!(
            base_keys(&debian()),
            vec!["default", "deb", "Debian", "Debian11"]
        );
    }

    #[test]
    fn native_keys_append_arch_prefixed_variants() {
        assert_eq!(
            native_keys(&debian()),
            vec![
                "default",
                "deb",
                "Debian",
                "Debian11",
                "x86_64-default",
                "x86_64-deb",
                "x86_64-Debian",
                "x86_64-Debian11",
            ]
        );
    }

    #[test]
    fn deb_foreign_keys_keep_the_unprefixed_fallbacks() {
        assert_eq!(
            foreign_keys(&debian(), "aarch64"),
            vec![
                "default",
                "deb",
                "Debian",
                "Debian11",
                "aarch64-default",
                "aarch64-deb",
                "aarch64-Debian",
                "aarch64-Debian11",
            ]
        );
    }

    #[test]
    fn rpm_foreign_keys_are_prefixed_only() {
        assert_eq!(
            foreign_keys(&fedora(), "mingw64"),
            vec![
                "mingw64-default",
                "mingw64-rpm",
                "mingw64-Fedora",
                "mingw64-Fedora35",
            ]
        );
    }

    #[test]
    fn other_format_has_no_foreign_chain() {
        let facts = FactsBuilder::default()
            .os("FreeBSD", "13")
            .packaging(PackagingFormat::Other, "pkg")
            .build();

        assert!(foreign_keys(&facts, "aarch64").is_empty());
    }

    #[test]
    fn policy_keys_are_prefixed_base_keys() {
        assert_eq!(
            policy_keys(&fedora()),
            vec![
                "cross-policy-default",
                "cross-policy-rpm",
                "cross-policy-Fedora",
                "cross-policy-Fedora35",
            ]
        );
    }
}
