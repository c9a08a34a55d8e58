//! Common imports for policy consumers.

pub use crate::config::{LogLevel, ShimConfig};
pub use crate::policy::{DeviceRule, PolicyResolver, ResolvedPolicy};
pub use joyshim_errors::ConfigError;
