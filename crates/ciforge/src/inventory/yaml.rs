//! YAML loader for the host inventory.
//!
//! Each host is one `<name>.yml` facts file in the inventory directory; the
//! file stem is the host name.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    facts::Facts,
    fs::{FileSystem, FileSystemError},
    inventory::Inventory,
    project::yaml::yaml_files,
};

#[derive(Error, Debug)]
pub enum InventoryLoadError {
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Inventory directory does not exist: {}", _0.display())]
    DirectoryNotFound(PathBuf),

    #[error("YAML parsing error reading facts file `{}`: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone)]
pub struct YamlInventoryLoader<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> YamlInventoryLoader<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn load(&self, dir: &Path) -> Result<Inventory, InventoryLoadError> {
        if !self.fs.path_exists(dir) {
            return Err(InventoryLoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut inventory = Inventory::new();

        for path in yaml_files(&self.fs, dir)? {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = self.fs.read_file(&path)?;
            let facts: Facts =
                serde_yaml::from_str(&content).map_err(|source| InventoryLoadError::YamlParse {
                    path: path.clone(),
                    source,
                })?;

            inventory.insert(name, facts);
        }

        Ok(inventory)
    }
}
