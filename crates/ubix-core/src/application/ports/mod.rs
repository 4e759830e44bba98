//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ubix-adapters` (and the
//! interactive prompter in `ubix-cli`) implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: stat, read, write, rename
//!   - `Archiver`: build the package zip
//!   - `Prompter`: ask the user for a field value
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `SolutionService` methods, called by the CLI handlers

pub mod output;

pub use output::{
    ArchiveEntry, ArchivePlan, Archiver, EntryKind, Filesystem, PromptField, Prompter,
};

#[cfg(test)]
pub use output::MockFilesystem;
