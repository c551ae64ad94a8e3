//! YAML loader for the three mapping registries.
//!
//! All registries live in a single `mappings.yml` document with three
//! top-level tables (`mappings`, `pypi_mappings`, `cpan_mappings`). The raw
//! form is a loosely-typed nested map with nulls as absent markers; loading
//! converts it into the typed registries, rejecting malformed keys and
//! invalid cross-policy values immediately.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    fs::{FileSystem, FileSystemError},
    mapping::{EcosystemRegistry, MappingEntry, MappingError, Mappings, Registry},
};

#[derive(Error, Debug)]
pub enum MappingLoadError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Mappings file not found: {}", _0.display())]
    NotFound(PathBuf),

    #[error("YAML parsing error reading mappings file `{}`: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

type RawRegistry = BTreeMap<String, BTreeMap<String, Option<String>>>;

#[derive(Debug, Deserialize)]
struct RawMappings {
    #[serde(default)]
    mappings: RawRegistry,

    #[serde(default)]
    pypi_mappings: RawRegistry,

    #[serde(default)]
    cpan_mappings: RawRegistry,
}

#[derive(Debug, Clone)]
pub struct YamlMappingLoader<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> YamlMappingLoader<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Load and validate the registries from a `mappings.yml` file.
    pub fn load(&self, path: &Path) -> Result<Mappings, MappingLoadError> {
        if !self.fs.path_exists(path) {
            return Err(MappingLoadError::NotFound(path.to_path_buf()));
        }

        let content = self.fs.read_file(path)?;
        let raw: RawMappings =
            serde_yaml::from_str(&content).map_err(|source| MappingLoadError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut primary = Registry::new();
        for (package, pairs) in raw.mappings {
            let entry = MappingEntry::from_pairs(&package, pairs)?;
            primary.insert(package, entry);
        }

        let pypi = ecosystem_registry("pypi", raw.pypi_mappings)?;
        let cpan = ecosystem_registry("cpan", raw.cpan_mappings)?;

        Ok(Mappings::new(primary, pypi, cpan))
    }
}

fn ecosystem_registry(
    name: &str,
    raw: RawRegistry,
) -> Result<EcosystemRegistry, MappingLoadError> {
    let mut registry = EcosystemRegistry::new();

    for (package, pairs) in raw {
        for (key, value) in pairs {
            if key != "default" {
                return Err(MappingError::UnknownEcosystemKey {
                    registry: name.to_string(),
                    package: package.clone(),
                    key,
                }
                .into());
            }
            registry.insert(package.clone(), value);
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fs::MockFileSystem, mapping::Resolution};
    use mockall::predicate::eq;
    use std::path::PathBuf;

    fn mock_mappings_file(content: &'static str) -> (MockFileSystem, PathBuf) {
        let mut fs = MockFileSystem::default();
        let path = PathBuf::from("/data/mappings.yml");

        fs.expect_path_exists()
            .with(eq(path.clone()))
            .return_const(true);
        fs.expect_read_file()
            .with(eq(path.clone()))
            .return_once(move |_| Ok(content.to_string()));

        (fs, path)
    }

    #[test]
    fn loads_all_three_registries() {
        let yaml = r#"
mappings:
  glib2:
    default: glib2
    deb: libglib2.0-dev
    cross-policy-default: foreign
pypi_mappings:
  meson:
    default: meson
cpan_mappings:
  perl-yaml:
    default: YAML
"#;
        let (fs, path) = mock_mappings_file(yaml);

        let mappings = YamlMappingLoader::new(fs).load(&path).unwrap();

        assert!(mappings.primary().contains("glib2"));
        assert_eq!(
            mappings.pypi().resolve("meson"),
            Resolution::Name("meson".to_string())
        );
        assert_eq!(
            mappings.cpan().resolve("perl-yaml"),
            Resolution::Name("YAML".to_string())
        );
    }

    #[test]
    fn null_values_become_absent_markers() {
        let yaml = r#"
mappings:
  vala:
    default: vala
    OpenSUSE:
pypi_mappings: {}
cpan_mappings: {}
"#;
        let (fs, path) = mock_mappings_file(yaml);

        let mappings = YamlMappingLoader::new(fs).load(&path).unwrap();
        let entry = mappings.primary().get("vala").unwrap();

        assert_eq!(entry.lookup("OpenSUSE"), Some(None));
    }

    #[test]
    fn invalid_policy_value_fails_at_load_time() {
        let yaml = r#"
mappings:
  gtk3:
    default: gtk3
    cross-policy-deb: maybe
"#;
        let (fs, path) = mock_mappings_file(yaml);

        let err = YamlMappingLoader::new(fs).load(&path).unwrap_err();
        assert!(matches!(
            err,
            MappingLoadError::Mapping(MappingError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn ecosystem_registries_reject_non_default_keys() {
        let yaml = r#"
pypi_mappings:
  meson:
    deb: meson
"#;
        let (fs, path) = mock_mappings_file(yaml);

        let err = YamlMappingLoader::new(fs).load(&path).unwrap_err();
        assert!(matches!(
            err,
            MappingLoadError::Mapping(MappingError::UnknownEcosystemKey { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let mut fs = MockFileSystem::default();
        let path = PathBuf::from("/data/mappings.yml");

        fs.expect_path_exists()
            .with(eq(path.clone()))
            .return_const(false);

        let err = YamlMappingLoader::new(fs).load(&path).unwrap_err();
        assert!(matches!(err, MappingLoadError::NotFound(_)));
    }

    #[test]
    fn unparseable_yaml_is_reported_with_the_path() {
        let (fs, path) = mock_mappings_file("mappings: [not, a, map]");

        let err = YamlMappingLoader::new(fs).load(&path).unwrap_err();
        assert!(matches!(err, MappingLoadError::YamlParse { .. }));
    }
}
