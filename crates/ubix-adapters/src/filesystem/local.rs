//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use ubix_core::{
    application::{ApplicationError, ports::{EntryKind, Filesystem}},
    error::{UbixError, UbixResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn stat(&self, path: &Path) -> UbixResult<Option<EntryKind>> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::Other)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "inspect")),
        }
    }

    fn create_dir_all(&self, path: &Path) -> UbixResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_file(&self, path: &Path) -> UbixResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> UbixResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> UbixResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(to, e, "replace file"))
    }

    fn remove_file(&self, path: &Path) -> UbixResult<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                Err(map_io_error(path, e, "remove file"))
            }
            _ => Ok(()),
        }
    }

    fn absolute(&self, path: &Path) -> UbixResult<PathBuf> {
        std::path::absolute(path).map_err(|e| map_io_error(path, e, "resolve path"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> UbixError {
    ApplicationError::Io {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stat_distinguishes_files_directories_and_absence() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ubix.json");
        std::fs::write(&file, "{}").unwrap();

        let fs = LocalFilesystem::new();
        assert_eq!(fs.stat(dir.path()).unwrap(), Some(EntryKind::Directory));
        assert_eq!(fs.stat(&file).unwrap(), Some(EntryKind::File));
        assert_eq!(fs.stat(&dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn rename_replaces_existing_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("ubix.json");
        let tmp = dir.path().join("ubix.json.tmp");
        std::fs::write(&target, "old").unwrap();

        let fs = LocalFilesystem::new();
        fs.write_file(&tmp, b"new").unwrap();
        fs.rename(&tmp, &target).unwrap();

        assert_eq!(fs.read_file(&target).unwrap(), b"new");
        assert_eq!(fs.stat(&tmp).unwrap(), None);
    }

    #[test]
    fn remove_file_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        let tmp = dir.path().join("ubix.json.tmp");
        std::fs::write(&tmp, "partial").unwrap();

        let fs = LocalFilesystem::new();
        fs.remove_file(&tmp).unwrap();
        assert_eq!(fs.stat(&tmp).unwrap(), None);
        fs.remove_file(&tmp).unwrap();
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&dir.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), ubix_core::error::ErrorKind::IoError);
    }

    #[test]
    fn absolute_resolves_relative_paths() {
        let abs = LocalFilesystem::new().absolute(Path::new("churn")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("churn"));
    }
}
