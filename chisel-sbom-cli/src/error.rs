//! CLI-specific error types and exit code mapping

use chisel_sbom_builder::SbomBuilderError;
use chisel_sbom_core::error::ChiselSbomError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Manifest reading or document conversion failed.
    #[error("conversion error: {0}")]
    Convert(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Manifest or conversion error         |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Convert(_) => 3,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<ChiselSbomError> for CliError {
    fn from(e: ChiselSbomError) -> Self {
        match e {
            ChiselSbomError::Config(err) => Self::Config(err.to_string()),
            ChiselSbomError::Io(err) => Self::Io(err),
            other => Self::Convert(other.to_string()),
        }
    }
}

impl From<SbomBuilderError> for CliError {
    fn from(e: SbomBuilderError) -> Self {
        match e {
            SbomBuilderError::Io { path, source } => {
                Self::Io(std::io::Error::new(source.kind(), format!("{path}: {source}")))
            }
            other => ChiselSbomError::from(other).into(),
        }
    }
}
