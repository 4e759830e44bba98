//! Implementation of the `ubix info` command.

use tracing::instrument;
use ubix_core::{domain::to_pretty_json, error::Context as _};

use crate::{
    cli::InfoArgs,
    error::{CliResult, IntoCli as _},
    output::OutputManager,
};

/// Print the manifest exactly as stored, re-indented.
#[instrument(skip_all)]
pub fn execute(args: InfoArgs, output: OutputManager) -> CliResult<()> {
    let document = super::solution_service()
        .info(args.solution.as_deref())
        .with_cli_context(|| "reading manifest")?;
    let text = to_pretty_json(&document).context("Failed to render manifest")?;
    output.data(text.trim_end())?;
    Ok(())
}
