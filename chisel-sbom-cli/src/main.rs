//! chisel-sbom command-line entry point

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use chisel_sbom_core::config::{GeneralConfig, SbomConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Best effort: config errors are reported by the command itself.
    let mut general = SbomConfig::load_or_default(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_else(|_| GeneralConfig::default());
    if let Some(level) = cli.log_level.clone() {
        general.log_level = level;
    }
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("warning: {e}");
    }

    chisel_sbom_core::metrics::describe_all();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = %e, exit_code = e.exit_code(), "command failed");
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output_format);

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args, &cli.config, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
