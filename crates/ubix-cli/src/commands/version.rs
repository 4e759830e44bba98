//! Implementation of the `ubix version` command.

use tracing::{debug, instrument};
use ubix_core::application::{VersionMode, VersionRequest};

use crate::{
    cli::{VersionAction, VersionArgs},
    error::CliResult,
    output::OutputManager,
};

/// Print the version, or compute and save a new one.
#[instrument(skip_all)]
pub fn execute(args: VersionArgs, output: OutputManager) -> CliResult<()> {
    let request = to_request(args);
    if request.mode == VersionMode::Show && has_bump_options(&request) {
        output.warning("Version options only apply to `ubix version update`")?;
    }

    let outcome = super::solution_service().version(request)?;
    debug!(manifest = %outcome.manifest_path.display(), "Version resolved");

    if outcome.updated {
        output.success(&format!("Version updated to {}", outcome.current))?;
    } else {
        output.data(&format!("Version is {}", outcome.current))?;
    }
    Ok(())
}

fn to_request(args: VersionArgs) -> VersionRequest {
    VersionRequest {
        mode: match args.action {
            Some(VersionAction::Update) => VersionMode::Update,
            None => VersionMode::Show,
        },
        solution: args.solution,
        version: args.solution_version,
        major: args.major,
        minor: args.minor,
        patch: args.patch,
    }
}

fn has_bump_options(request: &VersionRequest) -> bool {
    request.version.is_some()
        || request.major.is_some()
        || request.minor.is_some()
        || request.patch.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(argv: &[&str]) -> VersionRequest {
        match Cli::parse_from(argv).command {
            Commands::Version(args) => to_request(args),
            other => panic!("expected Version command, got {other:?}"),
        }
    }

    #[test]
    fn update_action_selects_update_mode() {
        let request = parse(&["ubix", "version", "update", "--major"]);
        assert_eq!(request.mode, VersionMode::Update);
        assert_eq!(request.major.as_deref(), Some("1"));
        assert!(has_bump_options(&request));
    }

    #[test]
    fn read_mode_without_options() {
        let request = parse(&["ubix", "version", "-s", "x/ubix.json"]);
        assert_eq!(request.mode, VersionMode::Show);
        assert!(!has_bump_options(&request));
    }
}
