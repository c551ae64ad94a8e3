//! YAML loader for the projects catalog.
//!
//! Each project is one `<name>.yml` file in the projects directory
//! containing a `packages` list; the file stem is the project name.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    fs::{FileSystem, FileSystemError},
    project::Projects,
};

#[derive(Error, Debug)]
pub enum ProjectLoadError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Projects directory does not exist: {}", _0.display())]
    DirectoryNotFound(PathBuf),

    #[error("YAML parsing error reading project file `{}`: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    packages: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct YamlProjectLoader<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> YamlProjectLoader<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn load(&self, dir: &Path) -> Result<Projects, ProjectLoadError> {
        if !self.fs.path_exists(dir) {
            return Err(ProjectLoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut projects = Projects::new();

        for path in yaml_files(&self.fs, dir)? {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = self.fs.read_file(&path)?;
            let file: ProjectFile =
                serde_yaml::from_str(&content).map_err(|source| ProjectLoadError::YamlParse {
                    path: path.clone(),
                    source,
                })?;

            projects.insert(name, file.packages);
        }

        Ok(projects)
    }
}

/// List the YAML files of a directory, ignoring everything else.
pub(crate) fn yaml_files<F: FileSystem>(
    fs: &F,
    dir: &Path,
) -> Result<Vec<PathBuf>, FileSystemError> {
    let entries = fs.list_directory(dir)?;

    Ok(entries
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    let ext = ext.to_lowercase();
                    ext == "yaml" || ext == "yml"
                })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use mockall::predicate::eq;

    #[test]
    fn loads_projects_from_yaml_files() {
        let mut fs = MockFileSystem::default();
        let dir = PathBuf::from("/data/projects");

        fs.expect_path_exists()
            .with(eq(dir.clone()))
            .return_const(true);
        fs.expect_list_directory().with(eq(dir.clone())).return_once({
            let dir = dir.clone();
            move |_| {
                Ok(vec![
                    dir.join("libvirt.yml"),
                    dir.join("base.yml"),
                    dir.join("README.md"),
                ])
            }
        });
        fs.expect_read_file()
            .with(eq(dir.join("libvirt.yml")))
            .return_once(|_| Ok("packages:\n  - glib2\n  - libxml2\n".to_string()));
        fs.expect_read_file()
            .with(eq(dir.join("base.yml")))
            .return_once(|_| Ok("packages:\n  - ccache\n".to_string()));

        let projects = YamlProjectLoader::new(fs).load(&dir).unwrap();

        assert_eq!(
            projects.packages("libvirt").unwrap(),
            &["glib2".to_string(), "libxml2".to_string()]
        );
        assert_eq!(projects.packages("base").unwrap(), &["ccache".to_string()]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let mut fs = MockFileSystem::default();
        let dir = PathBuf::from("/nope");

        fs.expect_path_exists()
            .with(eq(dir.clone()))
            .return_const(false);

        let err = YamlProjectLoader::new(fs).load(&dir).unwrap_err();
        assert!(matches!(err, ProjectLoadError::DirectoryNotFound(_)));
    }

    #[test]
    fn malformed_project_file_is_an_error() {
        let mut fs = MockFileSystem::default();
        let dir = PathBuf::from("/data/projects");

        fs.expect_path_exists()
            .with(eq(dir.clone()))
            .return_const(true);
        fs.expect_list_directory().with(eq(dir.clone())).return_once({
            let dir = dir.clone();
            move |_| Ok(vec![dir.join("broken.yml")])
        });
        fs.expect_read_file()
            .with(eq(dir.join("broken.yml")))
            .return_once(|_| Ok("packages: not-a-list".to_string()));

        let err = YamlProjectLoader::new(fs).load(&dir).unwrap_err();
        assert!(matches!(err, ProjectLoadError::YamlParse { .. }));
    }
}
