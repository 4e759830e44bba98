//! Unified error handling for Ubix Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Ubix Core operations.
///
/// Domain and application variants are transparent: their messages are
/// already phrased for the person at the terminal.
#[derive(Debug, Error, Clone)]
pub enum UbixError {
    /// Errors from the domain layer (validation and version rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, parsing, archiving).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl UbixError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in ubix".into(),
                "Please report this issue at: https://github.com/ubix/ubix-cli/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The fine-grained failure kind, independent of presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(e) => e.kind(),
            Self::Application(e) => e.kind(),
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Every way a `ubix` operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value did not match its pattern.
    InvalidFormat,
    /// A value that must be an integer was not one.
    InvalidInt,
    /// An increment would drive a version component out of range.
    InvalidIncrement,
    /// Several validation failures reported together.
    Validation,
    /// A required field ended up empty.
    MissingField,
    AlreadyExists,
    NotFound,
    WrongType,
    IoError,
    ParseError,
    ArchiveError,
    Prompt,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type UbixResult<T> = Result<T, UbixError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> UbixResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> UbixResult<T> {
        self.map_err(|e| UbixError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
