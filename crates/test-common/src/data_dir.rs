//! On-disk data-directory fixture for CLI integration tests.

use std::fs;
use std::path::Path;

const DEBIAN_11_FACTS: &str = r#"os:
  name: Debian
  version: "11"
packaging:
  format: deb
  command: apt-get
native_arch: x86_64
paths:
  cc: /usr/bin/gcc
  ccache: /usr/bin/ccache
  make: /usr/bin/make
  ninja: /usr/bin/ninja
  python: /usr/bin/python3
  pip3: /usr/bin/pip3
docker:
  base: debian:11-slim
"#;

const FEDORA_35_FACTS: &str = r#"os:
  name: Fedora
  version: "35"
packaging:
  format: rpm
  command: dnf
native_arch: x86_64
paths:
  cc: /usr/bin/gcc
  ccache: /usr/bin/ccache
  make: /usr/bin/make
  ninja: /usr/bin/ninja
  python: /usr/bin/python3
  pip3: /usr/bin/pip3
docker:
  base: registry.fedoraproject.org/fedora:35
"#;

const MAPPINGS: &str = r#"mappings:
  ccache:
    default: ccache
  make:
    default: make
  glib2:
    default: glib2
    deb: libglib2.0-dev
    cross-policy-default: foreign
  python3:
    default: python3
pypi_mappings:
  python3-pytest:
    default: pytest
cpan_mappings: {}
"#;

/// Write a complete data directory (inventory, projects, mappings) under
/// `root`, matching the in-memory fixtures.
pub fn write_data_dir(root: &Path) {
    let inventory = root.join("inventory");
    let projects = root.join("projects");
    fs::create_dir_all(&inventory).expect("create inventory dir");
    fs::create_dir_all(&projects).expect("create projects dir");

    fs::write(inventory.join("debian-11.yml"), DEBIAN_11_FACTS).expect("write debian facts");
    fs::write(inventory.join("fedora-35.yml"), FEDORA_35_FACTS).expect("write fedora facts");

    fs::write(
        projects.join("base.yml"),
        "packages:\n  - ccache\n  - make\n",
    )
    .expect("write base project");
    fs::write(
        projects.join("libvirt.yml"),
        "packages:\n  - glib2\n",
    )
    .expect("write libvirt project");
    fs::write(
        projects.join("libvirt-python.yml"),
        "packages:\n  - python3\n  - python3-pytest\n",
    )
    .expect("write libvirt-python project");

    fs::write(root.join("mappings.yml"), MAPPINGS).expect("write mappings");
}
