//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let mut out = std::io::stdout();

    match args.shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, "ubix", &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, "ubix", &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, "ubix", &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, "ubix", &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, "ubix", &mut out),
    }

    Ok(())
}
