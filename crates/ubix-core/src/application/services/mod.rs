//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "bump the solution version" or "package the
//! solution".

pub mod manifest_store;
pub mod solution_service;

pub use manifest_store::ManifestStore;
pub use solution_service::{
    InitDefaults, InitOutcome, InitPlan, InitRequest, PackageOutcome, PackageRequest,
    SolutionService, VersionMode, VersionOutcome, VersionRequest,
};
