//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use ubix_core::{
    application::{ApplicationError, ports::{EntryKind, Filesystem}},
    error::UbixResult,
};

/// In-memory filesystem for testing.
///
/// Relative paths are resolved against a fixed working directory
/// (`/work` unless set with [`MemoryFilesystem::with_cwd`]) and normalised
/// lexically, so `./ubix.json` and `ubix.json` name the same file.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    cwd: PathBuf,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new memory filesystem whose working directory exists.
    pub fn new() -> Self {
        Self::with_cwd("/work")
    }

    /// Create a memory filesystem rooted at `cwd`.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        let fs = Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
            cwd: cwd.into(),
        };
        fs.insert_dirs(&fs.cwd.clone());
        fs
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.resolve(path.as_ref());
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        if let Ok(mut inner) = self.inner.write() {
            inner.files.insert(path, content.as_ref().to_vec());
        }
    }

    /// Seed a directory and its parents (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.resolve(path.as_ref());
        self.insert_dirs(&path);
    }

    /// A file's content as UTF-8 (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.resolve(path.as_ref());
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(&path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Whether `path` is a known directory.
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let path = self.resolve(path.as_ref());
        self.inner
            .read()
            .map(|inner| inner.directories.contains(&path))
            .unwrap_or(false)
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn insert_dirs(&self, path: &Path) {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in self.cwd.join(path).components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other),
            }
        }
        out
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn stat(&self, path: &Path) -> UbixResult<Option<EntryKind>> {
        let path = self.resolve(path);
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.files.contains_key(&path) {
            Ok(Some(EntryKind::File))
        } else if inner.directories.contains(&path) {
            Ok(Some(EntryKind::Directory))
        } else {
            Ok(None)
        }
    }

    fn create_dir_all(&self, path: &Path) -> UbixResult<()> {
        let path = self.resolve(path);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::io(&current, "Not a directory").into());
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn read_file(&self, path: &Path) -> UbixResult<Vec<u8>> {
        let resolved = self.resolve(path);
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .files
            .get(&resolved)
            .cloned()
            .ok_or_else(|| ApplicationError::io(path, "No such file").into())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> UbixResult<()> {
        let resolved = self.resolve(path);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = resolved.parent() {
            if !inner.directories.contains(parent) {
                return Err(ApplicationError::io(path, "Parent directory does not exist").into());
            }
        }

        inner.files.insert(resolved, content.to_vec());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> UbixResult<()> {
        let source = self.resolve(from);
        let target = self.resolve(to);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let content = inner
            .files
            .remove(&source)
            .ok_or_else(|| ApplicationError::io(from, "No such file"))?;
        inner.files.insert(target, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> UbixResult<()> {
        let target = self.resolve(path);
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .files
            .remove(&target);
        Ok(())
    }

    fn absolute(&self, path: &Path) -> UbixResult<PathBuf> {
        Ok(self.resolve(path))
    }
}
