//! Cross-compilation policy and feasibility rules.
//!
//! The preflight checks run once per resolution, before any package is
//! looked at; every violation is fatal. The per-package policy is resolved
//! through the `cross-policy-*` key chain with the same last-match-wins
//! semantics as package names, defaulting to [`CrossPolicy::Native`].

use std::str::FromStr;

use thiserror::Error;

use crate::{arch, facts::Facts, mapping::MappingEntry};

/// What a cross build does with one package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossPolicy {
    /// Build/install the package for the native architecture.
    #[default]
    Native,
    /// Install the package for the foreign architecture instead.
    Foreign,
    /// The package is not usable in this cross build at all.
    Skip,
}

impl FromStr for CrossPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(Self::Native),
            "foreign" => Ok(Self::Foreign),
            "skip" => Ok(Self::Skip),
            _ => Err(()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossError {
    #[error("Cannot cross compile on {0}")]
    UnsupportedOs(String),

    #[error("Cannot cross compile for {cross_arch} on {os}")]
    ToolchainMismatch { cross_arch: String, os: String },

    #[error("Cross arch {cross_arch} should differ from native {native_arch}")]
    SameAsNative {
        cross_arch: String,
        native_arch: String,
    },

    #[error("Obsolete syntax in project {0}, please use --cross-arch")]
    ObsoleteProjectSuffix(String),

    #[error("Unexpected cross arch policy {value} for {package}")]
    InvalidPolicy { package: String, value: String },
}

/// Feasibility checks for a requested cross build.
///
/// Only two OS families can cross compile, and each supports exactly one
/// toolchain style: Debian targets foreign-architecture native toolchains,
/// Fedora targets Windows (`mingw*`) toolchains.
pub fn preflight(facts: &Facts, cross_arch: &str) -> Result<(), CrossError> {
    let os = facts.os_name();

    if os != "Debian" && os != "Fedora" {
        return Err(CrossError::UnsupportedOs(os.to_string()));
    }

    let windows_target = arch::is_windows_target(cross_arch);
    if (os == "Debian" && windows_target) || (os == "Fedora" && !windows_target) {
        return Err(CrossError::ToolchainMismatch {
            cross_arch: cross_arch.to_string(),
            os: os.to_string(),
        });
    }

    if cross_arch == facts.native_arch() {
        return Err(CrossError::SameAsNative {
            cross_arch: cross_arch.to_string(),
            native_arch: facts.native_arch().to_string(),
        });
    }

    Ok(())
}

/// Reject the historical `+mingw` project-name suffix.
pub fn reject_obsolete_projects(projects: &[String]) -> Result<(), CrossError> {
    for project in projects {
        if project.contains("+mingw") {
            return Err(CrossError::ObsoleteProjectSuffix(project.clone()));
        }
    }

    Ok(())
}

/// Resolve the cross policy for one package, last match wins.
pub fn resolve_policy(
    package: &str,
    entry: &MappingEntry,
    policy_chain: &[String],
) -> Result<CrossPolicy, CrossError> {
    match entry.resolve(policy_chain) {
        crate::mapping::Resolution::Unmatched => Ok(CrossPolicy::default()),
        crate::mapping::Resolution::Absent => Err(CrossError::InvalidPolicy {
            package: package.to_string(),
            value: "null".to_string(),
        }),
        crate::mapping::Resolution::Name(value) => {
            value.parse().map_err(|()| CrossError::InvalidPolicy {
                package: package.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{FactsBuilder, PackagingFormat};
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
    fn debian_cross_to_foreign_arch_is_feasible() {
        assert!(preflight(&debian(), "aarch64").is_ok());
    }

    #[test]
    fn fedora_cross_to_mingw_is_feasible() {
        assert!(preflight(&fedora(), "mingw64").is_ok());
    }

    #[test]
    fn non_cross_capable_os_is_rejected() {
        let facts = FactsBuilder::default()
            .os("OpenSUSE", "15.3")
            .packaging(PackagingFormat::Rpm, "zypper")
            .build();

        assert_eq!(
            preflight(&facts, "aarch64").unwrap_err(),
            CrossError::UnsupportedOs("OpenSUSE".to_string())
        );
    }

    #[test]
    fn debian_cannot_target_windows() {
        assert_eq!(
            preflight(&debian(), "mingw64").unwrap_err(),
            CrossError::ToolchainMismatch {
                cross_arch: "mingw64".to_string(),
                os: "Debian".to_string()
            }
        );
    }

    #[test]
    fn fedora_can_only_target_windows() {
        assert_eq!(
            preflight(&fedora(), "aarch64").unwrap_err(),
            CrossError::ToolchainMismatch {
                cross_arch: "aarch64".to_string(),
                os: "Fedora".to_string()
            }
        );
    }

    #[test]
    fn cross_arch_must_differ_from_native() {
        assert_eq!(
            preflight(&debian(), "x86_64").unwrap_err(),
            CrossError::SameAsNative {
                cross_arch: "x86_64".to_string(),
                native_arch: "x86_64".to_string()
            }
        );
    }

    #[test]
    fn obsolete_project_suffix_is_rejected() {
        let projects = vec!["libvirt".to_string(), "osinfo-db+mingw".to_string()];

        assert_eq!(
            reject_obsolete_projects(&projects).unwrap_err(),
            CrossError::ObsoleteProjectSuffix("osinfo-db+mingw".to_string())
        );
    }

    #[test]
    fn policy_defaults_to_native_without_override_keys() {
        let entry = MappingEntry::from_pairs("pkg", vec![("default", Some("pkg"))]).unwrap();
        let chain = vec!["cross-policy-default".to_string()];

        assert_eq!(
            resolve_policy("pkg", &entry, &chain).unwrap(),
            CrossPolicy::Native
        );
    }

    #[test]
    fn most_specific_policy_override_wins() {
        let entry = MappingEntry::from_pairs(
            "pkg",
            vec![
                ("cross-policy-default", Some("foreign")),
                ("cross-policy-Debian", Some("skip")),
            ],
        )
        .unwrap();
        let chain = vec![
            "cross-policy-default".to_string(),
            "cross-policy-Debian".to_string(),
        ];

        assert_eq!(
            resolve_policy("pkg", &entry, &chain).unwrap(),
            CrossPolicy::Skip
        );
    }

    #[test]
    fn empty_chain_means_native() {
        let entry =
            MappingEntry::from_pairs("pkg", vec![("cross-policy-default", Some("skip"))]).unwrap();

        assert_eq!(
            resolve_policy("pkg", &entry, &[]).unwrap(),
            CrossPolicy::Native
        );
    }
}
