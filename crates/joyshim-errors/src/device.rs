//! Status codes reported by the wrapped device layer.

use core::fmt;

use crate::common::ErrorSeverity;

/// Failure status returned by the device the policy layer forwards to.
///
/// `code` is the raw 32-bit status of the device API (negative means failure).
/// The controller propagates it verbatim when the device policy is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceStatus {
    /// Device API operation that failed.
    pub operation: &'static str,
    /// Raw status code.
    pub code: i32,
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "status codes are defined as u32 bit patterns"
)]
impl DeviceStatus {
    /// Unspecified failure.
    pub const FAILURE: i32 = 0x8000_4005_u32 as i32;
    /// Operation not implemented by the device.
    pub const UNSUPPORTED: i32 = 0x8000_4001_u32 as i32;
    /// Access to the device has been lost and must be re-acquired.
    pub const INPUT_LOST: i32 = 0x8007_001E_u32 as i32;
    /// The device is not acquired.
    pub const NOT_ACQUIRED: i32 = 0x8007_000C_u32 as i32;
    /// The device has no room for another effect.
    pub const DEVICE_FULL: i32 = 0x8004_0201_u32 as i32;

    /// Create a status for a failed operation.
    pub fn new(operation: &'static str, code: i32) -> Self {
        Self { operation, code }
    }

    /// Generic failure for an operation.
    pub fn failure(operation: &'static str) -> Self {
        Self::new(operation, Self::FAILURE)
    }

    /// Operation not supported by the device.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::new(operation, Self::UNSUPPORTED)
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self.code {
            Self::INPUT_LOST => ErrorSeverity::Critical,
            Self::UNSUPPORTED => ErrorSeverity::Info,
            Self::NOT_ACQUIRED => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if the device must be re-acquired (or re-created) before retrying.
    pub fn is_device_lost(&self) -> bool {
        matches!(self.code, Self::INPUT_LOST | Self::NOT_ACQUIRED)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed with status {:#010x}", self.operation, self.code)
    }
}

impl std::error::Error for DeviceStatus {}
