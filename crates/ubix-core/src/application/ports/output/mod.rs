//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ubix-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::ParamRule;
use crate::error::UbixResult;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ubix_adapters::filesystem::LocalFilesystem` (production)
/// - `ubix_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `stat` distinguishes "absent" (`Ok(None)`) from "cannot tell" (`Err`)
/// - Paths may be relative; `absolute` resolves them against the
///   adapter's working directory
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Inspect a path without following it into its contents.
    fn stat(&self, path: &Path) -> UbixResult<Option<EntryKind>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> UbixResult<()>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> UbixResult<Vec<u8>>;

    /// Create or truncate a file with `content`.
    fn write_file(&self, path: &Path, content: &[u8]) -> UbixResult<()>;

    /// Move `from` over `to`, replacing it.
    fn rename(&self, from: &Path, to: &Path) -> UbixResult<()>;

    /// Delete a file. Deleting a missing file succeeds.
    fn remove_file(&self, path: &Path) -> UbixResult<()>;

    /// Resolve `path` against the working directory.
    fn absolute(&self, path: &Path) -> UbixResult<PathBuf>;
}

/// One item to copy into an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    /// A directory tree, stored under `name/`.
    Directory { source: PathBuf, name: String },
    /// A single file, stored as `name`.
    File { source: PathBuf, name: String },
}

/// Everything needed to build one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    pub output: PathBuf,
    pub entries: Vec<ArchiveEntry>,
}

/// Port for building the package archive.
///
/// Implemented by:
/// - `ubix_adapters::archive::ZipArchiver`
pub trait Archiver: Send + Sync {
    /// Write the archive described by `plan`, returning its size in bytes.
    fn write_archive(&self, plan: &ArchivePlan) -> UbixResult<u64>;
}

/// One question asked during `init`.
#[derive(Debug, Clone)]
pub struct PromptField {
    pub key: &'static str,
    pub description: &'static str,
    pub default: String,
    pub rule: ParamRule<'static>,
    pub required: bool,
}

/// Port for interactive input.
///
/// Implemented by:
/// - `ubix_cli::prompt::DialoguerPrompter` (terminal)
/// - `ubix_adapters::prompt::DefaultsPrompter` (`--yes`, no TTY)
/// - `ubix_adapters::prompt::ScriptedPrompter` (tests)
pub trait Prompter {
    /// Ask for `field`, returning the raw answer.
    fn prompt(&self, field: &PromptField) -> UbixResult<String>;
}
