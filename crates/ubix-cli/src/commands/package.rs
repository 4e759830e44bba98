//! Implementation of the `ubix package` command.

use tracing::instrument;
use ubix_core::application::PackageRequest;

use crate::{cli::PackageArgs, error::CliResult, output::OutputManager};

/// Zip the solution and report the archive size.
#[instrument(skip_all)]
pub fn execute(args: PackageArgs, output: OutputManager) -> CliResult<()> {
    let outcome = super::solution_service().package(PackageRequest {
        path: args.path,
        file: args.file,
    })?;

    for folder in &outcome.skipped {
        output.warning(&format!("Folder '{folder}' not found, not packaged"))?;
    }
    output.success(&format!("Package written to {}", outcome.archive.display()))?;
    output.print(&format!("{} total bytes", outcome.bytes))?;

    Ok(())
}
