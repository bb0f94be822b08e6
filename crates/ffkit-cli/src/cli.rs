use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "ffkit CLI - Inspect, tabulate and validate molecular-dynamics force fields.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for validation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in water models.
    Models,
    /// Print the atom types and resolved interactions of a force field.
    Show(ShowArgs),
    /// Write force and energy of one interaction over a distance grid as CSV.
    Tabulate(TabulateArgs),
    /// Run the consistency checks on one or more force fields.
    Check(CheckArgs),
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Built-in model name (e.g., 'spc/e') or path to a TOML definition.
    #[arg(value_name = "MODEL")]
    pub model: String,
}

/// Arguments for the `tabulate` subcommand.
#[derive(Args, Debug)]
pub struct TabulateArgs {
    /// Built-in model name (e.g., 'spc/e') or path to a TOML definition.
    #[arg(value_name = "MODEL")]
    pub model: String,

    /// Name of the interaction type to tabulate (e.g., 'O-O Dispersion').
    #[arg(short, long, required = true, value_name = "NAME")]
    pub interaction: String,

    /// First distance of the grid.
    #[arg(long, value_name = "FLOAT")]
    pub start: Option<f64>,

    /// Last distance of the grid (inclusive).
    #[arg(long, value_name = "FLOAT")]
    pub end: Option<f64>,

    /// Grid spacing.
    #[arg(long, value_name = "FLOAT")]
    pub step: Option<f64>,

    /// Write the table to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Models to check. Defaults to every built-in model.
    #[arg(value_name = "MODEL")]
    pub models: Vec<String>,

    /// Largest accepted energy at a cutoff.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tabulate_with_overrides() {
        let cli = Cli::parse_from([
            "ffkit",
            "-vv",
            "tabulate",
            "spc/e",
            "--interaction",
            "O-O Dispersion",
            "--start",
            "0.25",
            "--step",
            "0.05",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Tabulate(args) => {
                assert_eq!(args.model, "spc/e");
                assert_eq!(args.interaction, "O-O Dispersion");
                assert_eq!(args.start, Some(0.25));
                assert_eq!(args.end, None);
                assert_eq!(args.step, Some(0.05));
                assert!(args.output.is_none());
            }
            other => panic!("Expected 'tabulate' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn check_accepts_zero_or_more_models() {
        let cli = Cli::parse_from(["ffkit", "check"]);
        assert!(matches!(cli.command, Commands::Check(ref args) if args.models.is_empty()));

        let cli = Cli::parse_from(["ffkit", "-q", "check", "opc3", "tip3p-fb"]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Check(args) => assert_eq!(args.models, vec!["opc3", "tip3p-fb"]),
            other => panic!("Expected 'check' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["ffkit", "-q", "-v", "models"]);
        assert!(result.is_err());
    }

    #[test]
    fn tabulate_requires_interaction() {
        let result = Cli::try_parse_from(["ffkit", "tabulate", "spc/e"]);
        assert!(result.is_err());
    }
}
