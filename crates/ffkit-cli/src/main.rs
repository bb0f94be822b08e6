mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod model;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use std::io;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("ffkit CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Config(format!("Failed to build global thread pool: {}", e))
            })?;
    }

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Commands::Models => {
            info!("Dispatching to 'models' command.");
            commands::models::run(&mut stdout)
        }
        Commands::Show(args) => {
            info!("Dispatching to 'show' command.");
            commands::show::run(args, &mut stdout)
        }
        Commands::Tabulate(args) => {
            info!("Dispatching to 'tabulate' command.");
            commands::tabulate::run(args, &mut stdout)
        }
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::check::run(args, &mut stdout)
        }
    }
}
