//! Ubix Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `ubix`
//! solution tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             ubix-cli (CLI)              │
//! │  init · version · info · package        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (SolutionService, ManifestStore)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │   (Filesystem, Archiver, Prompter)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     ubix-adapters (Infrastructure)      │
//! │ (LocalFilesystem, ZipArchiver, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Validator, Version, Manifest, Layout) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ubix_core::application::{SolutionService, VersionMode, VersionRequest};
//!
//! let service = SolutionService::new(filesystem, archiver);
//! let outcome = service.version(VersionRequest {
//!     mode: VersionMode::Update,
//!     ..VersionRequest::default()
//! })?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        InitDefaults, InitOutcome, InitPlan, InitRequest, ManifestStore, PackageOutcome,
        PackageRequest, SolutionService, VersionMode, VersionOutcome, VersionRequest,
        ports::{ArchiveEntry, ArchivePlan, Archiver, EntryKind, Filesystem, PromptField, Prompter},
    };
    pub use crate::domain::{
        ApiVersion, Manifest, ManifestFields, ParamRule, ParamValue, ValidationErrors, Version,
        VersionBump,
    };
    pub use crate::error::{ErrorKind, UbixError, UbixResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
