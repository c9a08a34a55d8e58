//! Top-level error type and classification.

use core::fmt;

use crate::{ConfigError, DeviceStatus};

/// Top-level error for policy enforcement and effect lifecycle operations.
///
/// Only two kinds ever reach a caller of the lifecycle controller:
/// [`FfbError::InvalidArgument`] and, when the device policy is enabled,
/// [`FfbError::Underlying`]. Configuration errors surface at load time.
#[derive(Debug, thiserror::Error)]
pub enum FfbError {
    /// Malformed or unusable input (including use of a destroyed effect).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the wrapped device layer, carrying its status.
    #[error("Underlying device failure: {0}")]
    Underlying(#[from] DeviceStatus),

    /// Configuration loading or parsing failure.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FfbError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        FfbError::InvalidArgument(msg.into())
    }

    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            FfbError::InvalidArgument(_) => ErrorCategory::Argument,
            FfbError::Underlying(_) => ErrorCategory::Device,
            FfbError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FfbError::InvalidArgument(_) => ErrorSeverity::Warning,
            FfbError::Underlying(status) => status.severity(),
            FfbError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// The wrapped device status, if this error came from the device layer.
    pub fn device_status(&self) -> Option<&DeviceStatus> {
        match self {
            FfbError::Underlying(status) => Some(status),
            _ => None,
        }
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Caller supplied invalid input
    Argument = 0,
    /// Wrapped device layer failure
    Device = 1,
    /// Configuration errors
    Config = 2,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Argument => write!(f, "Argument"),
            ErrorCategory::Device => write!(f, "Device"),
            ErrorCategory::Config => write!(f, "Config"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, the device is gone or unusable
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
