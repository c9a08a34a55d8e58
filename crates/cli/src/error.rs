//! Error types for the joyshim CLI

use joyshim_errors::{ConfigError, FfbError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<FfbError> for CliError {
    fn from(err: FfbError) -> Self {
        match err {
            FfbError::Config(config) => CliError::InvalidConfiguration(config),
            other => CliError::InvalidDescriptor(other.to_string()),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfiguration(_) => 2,
            CliError::InvalidDescriptor(_) | CliError::JsonError(_) => 4,
            CliError::IoError(_) => 5,
        }
    }
}
