//! In-memory fixtures: hosts, project catalogs, and mapping registries
//! shaped like a small but realistic data set.

use ciforge::{
    facts::{Facts, FactsBuilder, PackagingFormat},
    inventory::Inventory,
    mapping::{EcosystemRegistry, MappingEntry, Mappings, Registry},
    project::{BASE_PROJECT, Projects},
};

#[must_use]
pub fn debian_11_facts() -> Facts {
    FactsBuilder::default()
        .os("Debian", "11")
        .packaging(PackagingFormat::Deb, "apt-get")
        .native_arch("x86_64")
        .docker_base("debian:11-slim")
        .build()
}

#[must_use]
pub fn fedora_35_facts() -> Facts {
    FactsBuilder::default()
        .os("Fedora", "35")
        .packaging(PackagingFormat::Rpm, "dnf")
        .native_arch("x86_64")
        .docker_base("registry.fedoraproject.org/fedora:35")
        .build()
}

#[must_use]
pub fn freebsd_13_facts() -> Facts {
    FactsBuilder::default()
        .os("FreeBSD", "13")
        .packaging(PackagingFormat::Other, "pkg")
        .native_arch("x86_64")
        .build()
}

#[must_use]
pub fn test_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    inventory.insert("debian-11", debian_11_facts());
    inventory.insert("fedora-35", fedora_35_facts());
    inventory.insert("freebsd-13", freebsd_13_facts());
    inventory
}

#[must_use]
pub fn test_projects() -> Projects {
    let mut projects = Projects::new();
    projects.insert(BASE_PROJECT, ["ccache", "make"]);
    projects.insert("libvirt", ["gcc", "glib2", "libxml2"]);
    projects.insert("libvirt-python", ["python3", "python3-pytest"]);
    projects
}

/// A mapping set exercising every lookup shape: plain defaults, per-format
/// and per-OS overrides, null markers, cross policies, and ecosystem
/// fallbacks.
#[must_use]
pub fn test_mappings() -> Mappings {
    let mut primary = Registry::new();
    primary.insert("ccache", entry("ccache", &[("default", Some("ccache"))]));
    primary.insert("make", entry("make", &[("default", Some("make"))]));
    primary.insert("gcc", entry("gcc", &[("default", Some("gcc"))]));
    primary.insert(
        "glib2",
        entry(
            "glib2",
            &[
                ("default", Some("glib2")),
                ("deb", Some("libglib2.0-dev")),
                ("cross-policy-default", Some("foreign")),
            ],
        ),
    );
    primary.insert(
        "libxml2",
        entry(
            "libxml2",
            &[
                ("default", Some("libxml2")),
                ("deb", Some("libxml2-dev")),
                ("cross-policy-default", Some("foreign")),
            ],
        ),
    );
    primary.insert(
        "python3",
        entry("python3", &[("default", Some("python3"))]),
    );

    let mut pypi = EcosystemRegistry::new();
    pypi.insert("python3-pytest", Some("pytest".to_string()));

    let cpan = EcosystemRegistry::new();

    Mappings::new(primary, pypi, cpan)
}

fn entry(package: &str, pairs: &[(&str, Option<&str>)]) -> MappingEntry {
    MappingEntry::from_pairs(package, pairs.iter().cloned())
        .unwrap_or_else(|e| panic!("fixture mapping for {package}: {e}"))
}
