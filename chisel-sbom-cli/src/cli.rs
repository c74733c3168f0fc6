//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// chisel-sbom -- export chisel manifests as SPDX 2.3 SBOM documents.
///
/// Use `chisel-sbom <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "chisel-sbom", version, about, long_about = None)]
pub struct Cli {
    /// Path to the chisel-sbom.toml configuration file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Report output format.
    #[arg(long = "output-format", global = true, default_value = "text")]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Config path used when `--config` is not given. A missing file here is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "chisel-sbom.toml";

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a manifest.wall file into an SPDX JSON document.
    Convert(ConvertArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- convert ----

/// Convert a chisel manifest into an SPDX SBOM.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the zstd-compressed manifest.wall file.
    pub manifest: PathBuf,

    /// Output file (default: <manifest dir>/<document.output_file_name>).
    pub output: Option<PathBuf>,

    /// Override the SPDX document name.
    #[arg(long)]
    pub name: Option<String>,
}

// ---- config ----

/// Manage chisel-sbom configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, document).
        #[arg(long)]
        section: Option<String>,
    },
}
