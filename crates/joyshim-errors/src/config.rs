//! Configuration loading errors.

use crate::common::ErrorSeverity;

/// Errors raised while loading policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A device rule value is neither a keyword nor an integer percentage.
    #[error("Invalid policy '{value}' for device rule '{pattern}' (expected block, allow or 0-100)")]
    InvalidRule {
        /// Rule pattern
        pattern: String,
        /// Offending value
        value: String,
    },

    /// Document could not be deserialized.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// File extension is not a supported configuration format.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// I/O failure reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an invalid rule error.
    pub fn invalid_rule(pattern: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigError::InvalidRule {
            pattern: pattern.into(),
            value: value.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        ConfigError::Parse(msg.into())
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::InvalidRule { .. } => ErrorSeverity::Warning,
            ConfigError::Parse(_) | ConfigError::UnsupportedFormat(_) | ConfigError::Io(_) => {
                ErrorSeverity::Error
            }
        }
    }
}
