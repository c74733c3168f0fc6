//! Command handlers -- one module per subcommand

pub mod config;
pub mod convert;

use std::path::Path;

use chisel_sbom_core::config::SbomConfig;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Load the configuration used by a subcommand.
///
/// The default path may be absent (defaults + env overrides apply);
/// an explicitly given path must exist.
pub(crate) async fn load_config(config_path: &Path) -> Result<SbomConfig, CliError> {
    let config = if config_path == Path::new(DEFAULT_CONFIG_PATH) {
        SbomConfig::load_or_default(config_path).await?
    } else {
        SbomConfig::load(config_path).await?
    };
    Ok(config)
}
