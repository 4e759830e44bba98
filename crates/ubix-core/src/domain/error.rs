// ============================================================================
// domain/error.rs - VALIDATION AND VERSIONING ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::validation::ValidationErrors;
use crate::domain::version::VersionComponent;
use crate::error::ErrorKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into batches)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Field validation
    // ========================================================================
    /// A value did not match the pattern for its parameter.
    #[error("{message}")]
    InvalidFormat {
        param: String,
        value: String,
        message: String,
    },

    /// A value that must be an integer could not be parsed as one.
    #[error("{message}")]
    InvalidInt {
        param: String,
        value: String,
        message: String,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Versioning
    // ========================================================================
    /// Applying `increment` would take the component below zero (or past
    /// the largest representable value).
    #[error("Invalid {component} version increment: {increment}")]
    InvalidIncrement {
        component: VersionComponent,
        increment: i64,
    },

    // ========================================================================
    // Batches
    // ========================================================================
    /// Two or more failures collected by a batch validation pass.
    #[error("Errors:{0}")]
    Invalid(ValidationErrors),
}

impl DomainError {
    /// Build an `InvalidFormat` error using the default message convention.
    pub fn invalid_format(param: &str, value: &str, message: Option<&str>) -> Self {
        Self::InvalidFormat {
            param: param.into(),
            value: value.into(),
            message: message
                .map(str::to_owned)
                .unwrap_or_else(|| default_message(param, value)),
        }
    }

    /// Build an `InvalidInt` error using the default message convention.
    pub fn invalid_int(param: &str, value: &str, message: Option<&str>) -> Self {
        Self::InvalidInt {
            param: param.into(),
            value: value.into(),
            message: message
                .map(str::to_owned)
                .unwrap_or_else(|| default_message(param, value)),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFormat { param, .. } => match param.as_str() {
                "name" => vec![
                    "Solution names may contain letters, digits, '_', '-' and spaces".into(),
                    "Example: ubix init \"Churn Model\"".into(),
                ],
                "version" | "api" => vec![
                    "Versions are three dot-separated numbers, e.g. 1.0.0".into(),
                    "The API version may also be 'latest'".into(),
                ],
                _ => vec!["Check the value and try again".into()],
            },
            Self::InvalidInt { param, .. } => vec![
                format!("--{} expects a whole number, e.g. 1 or -1", param),
            ],
            Self::InvalidIncrement { component, .. } => vec![
                format!("The {} component cannot go below zero", component),
                "Use --version to set an explicit version instead".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            Self::Invalid(errors) => errors.iter().flat_map(|e| e.suggestions()).collect(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::InvalidInt { .. } => ErrorKind::InvalidInt,
            Self::MissingRequiredField { .. } => ErrorKind::MissingField,
            Self::InvalidIncrement { .. } => ErrorKind::InvalidIncrement,
            Self::Invalid(_) => ErrorKind::Validation,
        }
    }
}

fn default_message(param: &str, value: &str) -> String {
    format!("invalid value for {}: {}", param, value)
}
