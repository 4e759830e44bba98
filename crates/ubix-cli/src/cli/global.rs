//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `--verbose`, `-q`,
//! etc. are available on any invocation without repetition.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO, twice for DEBUG, three times for TRACE. Long-only
    /// because `-v` is `--version` on `init` and `version`. Conflicts with
    /// `--quiet`.
    #[arg(
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (repeat for more)",
        long_help = "Increase logging verbosity:
    (none)                        - Warnings and errors
    --verbose                     - Info level (progress messages)
    --verbose --verbose           - Debug level (detailed diagnostics)
    --verbose --verbose --verbose - Trace level (very verbose)

With --verbose, errors also show their cause and suggestions."
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
