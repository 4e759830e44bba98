//! Application layer for Ubix.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SolutionService, ManifestStore)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    InitDefaults, InitOutcome, InitPlan, InitRequest, ManifestStore, PackageOutcome,
    PackageRequest, SolutionService, VersionMode, VersionOutcome, VersionRequest,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Archiver, Filesystem, Prompter};

pub use error::ApplicationError;
