//! File system port used by the on-disk loaders.
//!
//! Inventory, project, and mapping loaders all go through this trait so they
//! can be exercised against a mock in tests. The resolver itself never
//! touches the file system.

pub mod real;

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Port for the handful of file system operations the loaders need.
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a UTF-8 string.
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Check whether a path exists (file or directory).
    fn path_exists(&self, path: &Path) -> bool;

    /// List the entries of a directory as absolute paths.
    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError>;

    /// Expand `~` and similar shell-isms in a user-provided path.
    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError>;
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory does not exist: {}", _0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Cannot determine the user's home directory")]
    HomeDirNotFound,
}
