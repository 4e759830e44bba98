//! Application layer errors.
//!
//! These errors represent failures in orchestration (filesystem, parsing,
//! archiving, prompting), not business rules. Business rule errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, ErrorKind};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The `init` target is already present, as a file or a directory.
    #[error("Cannot create solution at {}: folder already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Cannot find {what} at {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// The path exists but is not the expected kind of entry.
    #[error("{what} {} is the wrong type", path.display())]
    WrongType { what: &'static str, path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// The manifest exists but is not a valid document.
    #[error("Invalid solution manifest file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Building the package archive failed.
    #[error("Cannot write archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    /// The interactive prompt could not be completed.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },

    /// In-memory store access failed (lock poisoned).
    #[error("Filesystem store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    pub fn io(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("Remove or rename {} first", path.display()),
                "Or choose a different solution name or --path".into(),
            ],
            Self::NotFound { what, .. } => match *what {
                "solution file" => vec![
                    "Run this command from a solution folder".into(),
                    "Or point at the manifest with --solution <file>".into(),
                    "Create a new solution with: ubix init <name>".into(),
                ],
                _ => vec!["Check the path and try again".into()],
            },
            Self::WrongType { what, path } => match *what {
                "solution file" => vec![format!("{} must be a regular file", path.display())],
                _ => vec![format!("{} must be a directory", path.display())],
            },
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::Parse { .. } => vec![
                "The manifest must be a JSON object with at least 'name' and 'version'".into(),
                "Versions are three dot-separated numbers, e.g. 1.0.0".into(),
            ],
            Self::Archive { .. } => vec![
                "Check free disk space and write permissions for the output file".into(),
            ],
            Self::Prompt { .. } => vec![
                "Re-run with --yes to accept defaults without prompting".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } | Self::WrongType { .. } | Self::Parse { .. } => {
                ErrorCategory::Validation
            }
            Self::Io { .. } | Self::Archive { .. } | Self::Prompt { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::WrongType { .. } => ErrorKind::WrongType,
            Self::Io { .. } | Self::StoreLockError => ErrorKind::IoError,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::Archive { .. } => ErrorKind::ArchiveError,
            Self::Prompt { .. } => ErrorKind::Prompt,
        }
    }
}
