// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Ubix.
//!
//! Pure business logic: parameter validation, semantic versions and the
//! bump rules, the manifest model and the on-disk layout of a solution.
//! All I/O is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Value types**: Everything here is Clone + PartialEq

// Public API - what the world sees
pub mod error;
pub mod layout;
pub mod manifest;
pub mod validation;
pub mod version;

pub use error::DomainError;

pub use layout::{
    ARCHIVE_FILE, MANIFEST_FILE, PACKAGED_DIRS, SKELETON_DIRS, SolutionLayout,
    manifest_path_field, sanitize_file_name,
};

pub use manifest::{Manifest, ManifestFields, StoredManifest, timestamp_now, to_pretty_json};

pub use validation::{
    ParamRule, ParamValue, ValidationErrors, validate_int, validate_param, validate_text,
};

pub use version::{
    ApiVersion, BumpArgs, Version, VersionBump, VersionComponent, compute_new_version,
};
