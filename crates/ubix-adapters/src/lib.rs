//! Infrastructure adapters for Ubix.
//!
//! This crate implements the ports defined in `ubix-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod filesystem;
pub mod prompt;

// Re-export commonly used adapters
pub use archive::ZipArchiver;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::{DefaultsPrompter, ScriptedPrompter};
