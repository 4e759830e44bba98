//! Implementation of the `ubix init` command.
//!
//! Responsibility: turn CLI arguments into an `InitRequest`, report rejected
//! overrides, prompt for the rest and display the result.

use tracing::{debug, instrument};
use ubix_core::{
    application::{InitPlan, InitRequest},
    domain::ValidationErrors,
};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

/// Execute the `ubix init` command.
///
/// 1. Check the target folder and the command-line values
/// 2. Show rejected values as warnings; they are asked for instead
/// 3. Prompt (or take defaults with `--yes` / no terminal)
/// 4. Confirm, then write the skeleton and manifest
#[instrument(skip_all, fields(solution = %args.name))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let interactive = prompt::is_interactive(args.yes);
    let service = super::solution_service();

    let plan = service.plan_init(to_request(args, &config))?;
    if let Some(block) = warning_block(plan.warnings()) {
        output.warning(&block)?;
    }

    let prompter = prompt::prompter(interactive);
    let fields = service.answer(&plan, prompter.as_ref())?;
    debug!(interactive, name = %fields.name, "Fields confirmed");

    if interactive && !prompt::confirm(&confirm_question(&plan, &fields.name))? {
        return Err(CliError::Cancelled);
    }

    let outcome = service.create(plan, fields)?;

    output.success(&format!(
        "Solution '{}' created at {}",
        outcome.manifest.name,
        outcome.directory.display()
    ))?;
    output.info(&format!(
        "Manifest written to {}",
        outcome.manifest_path.display()
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", outcome.directory.display()))?;
    output.print("  # add data/, scripts/ and dsl/ content")?;
    output.print("  ubix package")?;

    Ok(())
}

fn to_request(args: InitArgs, config: &AppConfig) -> InitRequest {
    InitRequest {
        name: args.name,
        path: args.path,
        author: args.author,
        version: args.solution_version,
        api: args.api,
        defaults: config.init_defaults(),
    }
}

/// `Errors in parameters:` followed by one bullet per rejected value.
fn warning_block(warnings: &ValidationErrors) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let mut block = String::from("Errors in parameters:");
    for message in warnings.messages() {
        block.push_str("\n  * ");
        block.push_str(&message);
    }
    Some(block)
}

fn confirm_question(plan: &InitPlan, name: &str) -> String {
    format!("Create solution '{}' in {}?", name, plan.directory().display())
}
