//! Per-device force feedback policy
//!
//! Maps a device's product name to an allow/block decision plus a magnitude
//! scale, using an ordered list of case-insensitive substring rules loaded
//! from configuration.
//!
//! # Example
//!
//! ```
//! use joyshim_policy::{PolicyResolver, ResolvedPolicy, ShimConfig};
//!
//! let config = ShimConfig::from_yaml_str(
//!     "devices:\n  - { pattern: \"MFG Crosswind\", policy: block }\n  - { pattern: Logitech, policy: 50 }\n",
//! )?;
//! let resolver = PolicyResolver::from_config(&config)?;
//!
//! assert_eq!(resolver.resolve("MFG Crosswind V2"), ResolvedPolicy::block());
//! assert_eq!(resolver.resolve("Logitech G940 Joystick").scale_percent, 50);
//! # Ok::<(), joyshim_errors::ConfigError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod policy;
pub mod prelude;

pub use config::{
    DeviceRuleConfig, FfbSettings, GeneralSettings, LogLevel, RuleSetting, ShimConfig,
};
pub use policy::{DeviceRule, MAX_SCALE_PERCENT, PolicyResolver, ResolvedPolicy};
