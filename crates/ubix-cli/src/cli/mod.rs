//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "ubix",
    bin_name = "ubix",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create, version and package UBIX solutions",
    long_about = "ubix scaffolds solution folders, keeps the version in their \
                  ubix.json manifest up to date and packages them as zip archives.",
    after_help = "EXAMPLES:\n\
        \x20 ubix init \"Churn Model\" --author Ana --version 1.0.0\n\
        \x20 ubix version update --minor\n\
        \x20 ubix info --solution ./churn-model/ubix.json\n\
        \x20 ubix package --path ./churn-model",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new solution folder with its manifest.
    #[command(
        visible_alias = "create",
        about = "Create a new solution",
        after_help = "EXAMPLES:\n\
            \x20 ubix init churn\n\
            \x20 ubix init churn --path ~/solutions --api 2.1.0 --yes"
    )]
    Init(InitArgs),

    /// Show or update the solution version.
    #[command(
        visible_alias = "ver",
        about = "Show or update the solution version",
        after_help = "EXAMPLES:\n\
            \x20 ubix version                  # print the current version\n\
            \x20 ubix version update           # bump the patch number\n\
            \x20 ubix version update -M        # bump the major number\n\
            \x20 ubix version set -v 2.0.0     # set an explicit version"
    )]
    Version(VersionArgs),

    /// Print the solution manifest.
    #[command(about = "Print the solution manifest")]
    Info(InfoArgs),

    /// Build a zip archive of the solution.
    #[command(
        visible_alias = "pack",
        about = "Package the solution as a zip archive",
        after_help = "EXAMPLES:\n\
            \x20 ubix package\n\
            \x20 ubix package --path ./churn --file /tmp/churn.zip"
    )]
    Package(PackageArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ubix completions bash > ~/.local/share/bash-completion/completions/ubix\n\
            \x20 ubix completions zsh  > ~/.zfunc/_ubix\n\
            \x20 ubix completions fish > ~/.config/fish/completions/ubix.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `ubix init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Solution name; also the folder name once unsafe characters are removed.
    #[arg(value_name = "SOLUTION_NAME", help = "Solution name")]
    pub name: String,

    /// Folder to create the solution in.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Parent folder (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(short = 'A', long = "author", value_name = "AUTHOR", help = "Solution author")]
    pub author: Option<String>,

    #[arg(
        short = 'v',
        long = "version",
        value_name = "X.Y.Z",
        help = "Initial solution version"
    )]
    pub solution_version: Option<String>,

    #[arg(
        short = 'V',
        long = "api",
        value_name = "X.Y.Z|latest",
        help = "UBIX API version"
    )]
    pub api: Option<String>,

    /// Accept defaults for everything not given on the command line.
    #[arg(short = 'y', long = "yes", help = "Do not prompt; use defaults")]
    pub yes: bool,
}

// ── version ───────────────────────────────────────────────────────────────────

/// Arguments for `ubix version`.
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Omit to print the current version.
    #[arg(value_enum, value_name = "ACTION")]
    pub action: Option<VersionAction>,

    #[arg(
        short = 's',
        long = "solution",
        value_name = "FILE",
        help = "Solution manifest (default: ./ubix.json)"
    )]
    pub solution: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "version",
        value_name = "X.Y.Z",
        help = "Set this exact version"
    )]
    pub solution_version: Option<String>,

    #[arg(
        short = 'M',
        long = "major",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "1",
        allow_negative_numbers = true,
        help = "Add N (default 1) to the major number"
    )]
    pub major: Option<String>,

    #[arg(
        short = 'm',
        long = "minor",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "1",
        allow_negative_numbers = true,
        help = "Add N (default 1) to the minor number"
    )]
    pub minor: Option<String>,

    #[arg(
        short = 'p',
        long = "patch",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "1",
        allow_negative_numbers = true,
        help = "Add N (default 1) to the patch number"
    )]
    pub patch: Option<String>,
}

/// What `ubix version` does with the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionAction {
    /// Compute and save a new version.
    #[value(alias = "set")]
    Update,
}

// ── info ──────────────────────────────────────────────────────────────────────

/// Arguments for `ubix info`.
#[derive(Debug, Args)]
pub struct InfoArgs {
    #[arg(
        short = 's',
        long = "solution",
        value_name = "FILE",
        help = "Solution manifest (default: ./ubix.json)"
    )]
    pub solution: Option<PathBuf>,
}

// ── package ───────────────────────────────────────────────────────────────────

/// Arguments for `ubix package`.
#[derive(Debug, Args)]
pub struct PackageArgs {
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Solution folder (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Archive to write (default: <path>/ubix.zip)"
    )]
    pub file: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `ubix completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_with_overrides() {
        let cli = Cli::parse_from([
            "ubix", "init", "Churn Model", "-p", "/tmp", "-A", "Ana", "-v", "1.0.0", "-V",
            "latest", "-y",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.name, "Churn Model");
        assert_eq!(args.path, Some(PathBuf::from("/tmp")));
        assert_eq!(args.author.as_deref(), Some("Ana"));
        assert_eq!(args.solution_version.as_deref(), Some("1.0.0"));
        assert_eq!(args.api.as_deref(), Some("latest"));
        assert!(args.yes);
    }

    #[test]
    fn create_is_an_alias_for_init() {
        let cli = Cli::parse_from(["ubix", "create", "churn"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn version_without_action_is_read_only() {
        let cli = Cli::parse_from(["ubix", "ver"]);
        let Commands::Version(args) = cli.command else {
            panic!("expected Version command");
        };
        assert_eq!(args.action, None);
    }

    #[test]
    fn bare_increment_flags_default_to_one() {
        let cli = Cli::parse_from(["ubix", "version", "update", "-M", "-m", "3"]);
        let Commands::Version(args) = cli.command else {
            panic!("expected Version command");
        };
        assert_eq!(args.action, Some(VersionAction::Update));
        assert_eq!(args.major.as_deref(), Some("1"));
        assert_eq!(args.minor.as_deref(), Some("3"));
        assert_eq!(args.patch, None);
    }

    #[test]
    fn negative_increments_are_accepted() {
        let cli = Cli::parse_from(["ubix", "version", "update", "--patch", "-1"]);
        let Commands::Version(args) = cli.command else {
            panic!("expected Version command");
        };
        assert_eq!(args.patch.as_deref(), Some("-1"));
    }

    #[test]
    fn set_is_an_alias_for_update() {
        let cli = Cli::parse_from(["ubix", "version", "set", "-v", "2.0.0"]);
        let Commands::Version(args) = cli.command else {
            panic!("expected Version command");
        };
        assert_eq!(args.action, Some(VersionAction::Update));
        assert_eq!(args.solution_version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn pack_is_an_alias_for_package() {
        let cli = Cli::parse_from(["ubix", "pack", "-p", "churn", "-f", "out.zip"]);
        let Commands::Package(args) = cli.command else {
            panic!("expected Package command");
        };
        assert_eq!(args.path, Some(PathBuf::from("churn")));
        assert_eq!(args.file, Some(PathBuf::from("out.zip")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["ubix", "--quiet", "--verbose", "info"]);
        assert!(result.is_err());
    }
}
