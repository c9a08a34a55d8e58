//! Prelude module for convenient error handling imports.

pub use crate::{
    DeviceResult, Result,
    common::{ErrorCategory, ErrorSeverity, FfbError},
    config::ConfigError,
    device::DeviceStatus,
};
