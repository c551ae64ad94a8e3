//! The package-set resolver.
//!
//! For every package of the selected projects (plus the implicit `base`
//! project) the resolver computes one immutable [`Outcome`], then folds the
//! outcomes into the native, foreign, PyPI and CPAN package collections and
//! assembles the variable map. Resolution is a pure function of its inputs;
//! nothing persists between calls and the input registries are never
//! mutated.
//!
//! Precedence between registries is a single comparison: a name from the
//! primary registry always wins, and only a package with no primary name
//! falls through to the ecosystem registries. A `skip` policy therefore
//! suppresses the whole package when a primary name resolved (the primary
//! name claimed the package before being discarded), while a package known
//! only to the ecosystem registries is unaffected by cross policy.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    arch::{self, ArchError},
    cross::{self, CrossError, CrossPolicy},
    facts::{Facts, PackagingFormat},
    keychain,
    mapping::Mappings,
    project::{BASE_PROJECT, ProjectError, Projects},
    varmap::VarMap,
};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No mapping defined for {0}")]
    MissingMapping(String),

    #[error(transparent)]
    Cross(#[from] CrossError),

    #[error(transparent)]
    Arch(#[from] ArchError),

    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Classification of one package, computed before any set is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    /// Installed for the native architecture under this name.
    Native(String),
    /// Installed for the foreign architecture under this name.
    Foreign(String),
    /// No system package; handled by the language ecosystems.
    Ecosystem {
        pypi: Option<String>,
        cpan: Option<String>,
    },
    /// Not needed on this platform/arch combination.
    Absent,
}

/// Resolves package sets for one host against the mapping registries.
#[derive(Debug, Clone)]
pub struct PackageResolver<'a> {
    facts: &'a Facts,
    mappings: &'a Mappings,
    projects: &'a Projects,
}

impl<'a> PackageResolver<'a> {
    #[must_use]
    pub fn new(facts: &'a Facts, mappings: &'a Mappings, projects: &'a Projects) -> Self {
        Self {
            facts,
            mappings,
            projects,
        }
    }

    /// Resolve the selected projects into a variable map.
    ///
    /// `selection` is the expanded project list; the `base` project is added
    /// here, the standard machinery hides it as an implementation detail.
    #[instrument(skip(self), fields(host_os = self.facts.os_name()))]
    pub fn resolve(
        &self,
        selection: &[String],
        cross_arch: Option<&str>,
    ) -> Result<VarMap, ResolveError> {
        cross::reject_obsolete_projects(selection)?;

        let cross_arch = cross_arch.map(arch::canonicalize);
        if let Some(cross) = cross_arch {
            cross::preflight(self.facts, cross)?;
        }

        let native_chain = keychain::native_keys(self.facts);
        let foreign_chain = cross_arch
            .map(|cross| keychain::foreign_keys(self.facts, cross))
            .unwrap_or_default();
        let policy_chain = if cross_arch.is_some() {
            keychain::policy_keys(self.facts)
        } else {
            Vec::new()
        };

        // One classification per package; duplicates across projects
        // collapse here.
        let mut outcomes: BTreeMap<String, Outcome> = BTreeMap::new();

        for project in selection.iter().map(String::as_str).chain([BASE_PROJECT]) {
            for package in self.projects.packages(project)? {
                if outcomes.contains_key(package) {
                    continue;
                }

                let outcome = self.classify(
                    package,
                    &native_chain,
                    &foreign_chain,
                    &policy_chain,
                    cross_arch.is_some(),
                )?;
                outcomes.insert(package.clone(), outcome);
            }
        }

        debug!(packages = outcomes.len(), "classified packages");

        self.assemble(outcomes, cross_arch)
    }

    /// Classify one package: which set it lands in, under which name.
    fn classify(
        &self,
        package: &str,
        native_chain: &[String],
        foreign_chain: &[String],
        policy_chain: &[String],
        cross: bool,
    ) -> Result<Outcome, ResolveError> {
        if !self.mappings.contains(package) {
            return Err(ResolveError::MissingMapping(package.to_string()));
        }

        if let Some(entry) = self.mappings.primary().get(package) {
            let policy = cross::resolve_policy(package, entry, policy_chain)?;

            let chain = if cross && policy == CrossPolicy::Foreign {
                foreign_chain
            } else {
                native_chain
            };

            if let Some(name) = entry.resolve(chain).into_name() {
                // The primary name claims the package (I4) even when the
                // policy then discards it.
                return Ok(match policy {
                    CrossPolicy::Native => Outcome::Native(name),
                    CrossPolicy::Foreign => Outcome::Foreign(name),
                    CrossPolicy::Skip => Outcome::Absent,
                });
            }
        }

        let pypi = self.mappings.pypi().resolve(package).into_name();
        let cpan = self.mappings.cpan().resolve(package).into_name();

        if pypi.is_some() || cpan.is_some() {
            Ok(Outcome::Ecosystem { pypi, cpan })
        } else {
            Ok(Outcome::Absent)
        }
    }

    /// Fold the classifications into the output sets and build the varmap.
    fn assemble(
        &self,
        outcomes: BTreeMap<String, Outcome>,
        cross_arch: Option<&str>,
    ) -> Result<VarMap, ResolveError> {
        let mut native: BTreeMap<String, String> = BTreeMap::new();
        let mut foreign: BTreeMap<String, String> = BTreeMap::new();
        let mut pypi: BTreeMap<String, String> = BTreeMap::new();
        let mut cpan: BTreeMap<String, String> = BTreeMap::new();

        for (package, outcome) in outcomes {
            match outcome {
                Outcome::Native(name) => {
                    native.insert(package, name);
                }
                Outcome::Foreign(name) => {
                    foreign.insert(package, name);
                }
                Outcome::Ecosystem {
                    pypi: pypi_name,
                    cpan: cpan_name,
                } => {
                    if let Some(name) = pypi_name {
                        pypi.insert(package.clone(), name);
                    }
                    if let Some(name) = cpan_name {
                        cpan.insert(package, name);
                    }
                }
                Outcome::Absent => {}
            }
        }

        let mut varmap = VarMap::new();
        varmap.set_scalar("packaging_command", self.facts.packaging_command());
        for (name, value) in self.facts.paths().as_vars() {
            varmap.set_scalar(name, value);
        }

        varmap.set_list("pkgs", native.into_values());

        if let Some(cross) = cross_arch {
            let abi = arch::to_abi(cross)?;
            varmap.set_scalar("cross_arch", cross);
            varmap.set_scalar("cross_abi", abi);

            match self.facts.packaging_format() {
                PackagingFormat::Deb => {
                    // Foreign deb names are the native names qualified with
                    // the foreign architecture, plus the cross compiler.
                    let deb_arch = arch::to_deb_arch(cross)?;
                    let mut cross_pkgs: Vec<String> = foreign
                        .into_values()
                        .map(|name| format!("{name}:{deb_arch}"))
                        .collect();
                    cross_pkgs.push(format!("gcc-{abi}"));

                    varmap.set_scalar("cross_arch_deb", deb_arch);
                    varmap.set_list("cross_pkgs", cross_pkgs);
                }
                PackagingFormat::Rpm => {
                    // The cross compiler is synthesized under the `gcc` key,
                    // overriding whatever the registry said for it.
                    foreign.insert("gcc".to_string(), format!("{cross}-gcc"));
                    varmap.set_list("cross_pkgs", foreign.into_values());
                }
                PackagingFormat::Other => {}
            }
        }

        if !pypi.is_empty() {
            varmap.set_list("pypi_pkgs", pypi.into_values());
        }
        if !cpan.is_empty() {
            varmap.set_list("cpan_pkgs", cpan.into_values());
        }

        Ok(varmap)
    }
}
