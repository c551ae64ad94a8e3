// Real file system adapter implementation

use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};

use crate::fs::{FileSystem, FileSystemError};

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        Ok(fs::read_to_string(path)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let entries = fs::read_dir(path)?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(FileSystemError::Io)?;
            paths.push(entry.path());
        }

        Ok(paths)
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde(&binding);

        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Locate the default data directory (inventory, projects, mappings).
///
/// `CIFORGE_DATA_DIR` overrides the platform-specific location.
pub fn default_data_dir() -> Result<PathBuf, FileSystemError> {
    if let Ok(dir) = std::env::var("CIFORGE_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    choose_app_strategy(AppStrategyArgs {
        top_level_domain: "org".to_string(),
        author: "ciforge".to_string(),
        app_name: "ciforge".to_string(),
    })
    .map(|strategy| strategy.data_dir())
    .map_err(|_| FileSystemError::HomeDirNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_path_exists() {
        let fs = RealFileSystem;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("facts.yml");

        assert!(!fs.path_exists(&file_path));

        File::create(&file_path).unwrap();

        assert!(fs.path_exists(&file_path));
    }

    #[test]
    fn test_read_file() {
        let fs = RealFileSystem;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("mappings.yml");

        let content = "mappings: {}\n";
        std::fs::write(&file_path, content).unwrap();

        assert_eq!(fs.read_file(&file_path).unwrap(), content);

        let missing = dir.path().join("missing.yml");
        let err = fs.read_file(&missing).unwrap_err();
        assert!(matches!(err, FileSystemError::Io(_)));
    }

    #[test]
    fn test_list_directory() {
        let fs = RealFileSystem;

        let dir = tempdir().unwrap();
        let file1 = dir.path().join("host1.yml");
        let file2 = dir.path().join("host2.yml");

        File::create(&file1).unwrap();
        File::create(&file2).unwrap();

        let paths = fs.list_directory(dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&file1));
        assert!(paths.contains(&file2));
    }

    #[test]
    fn test_expand_path_passes_through_absolute_paths() {
        let fs = RealFileSystem;

        let expanded = fs.expand_path(Path::new("/var/lib/ciforge")).unwrap();
        assert_eq!(expanded, PathBuf::from("/var/lib/ciforge"));
    }

    #[test]
    fn test_data_dir_env_override() {
        // Serialize around the env var with a scoped value
        unsafe { std::env::set_var("CIFORGE_DATA_DIR", "/tmp/ciforge-data") };
        let dir = default_data_dir().unwrap();
        unsafe { std::env::remove_var("CIFORGE_DATA_DIR") };

        assert_eq!(dir, PathBuf::from("/tmp/ciforge-data"));
    }
}
