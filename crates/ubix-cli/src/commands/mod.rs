//! One module per subcommand.
//!
//! Handlers translate parsed arguments into a core request, call
//! [`SolutionService`] and report the outcome. No business logic lives here.

use ubix_adapters::{LocalFilesystem, ZipArchiver};
use ubix_core::application::SolutionService;

pub mod completions;
pub mod info;
pub mod init;
pub mod package;
pub mod version;

/// The service wired to the real filesystem.
fn solution_service() -> SolutionService {
    SolutionService::new(Box::new(LocalFilesystem::new()), Box::new(ZipArchiver::new()))
}
