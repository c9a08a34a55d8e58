//! Error types for the joyshim force feedback policy layer.
//!
//! The error system is organized into a few small modules:
//!
//! - [`common`]: the top-level [`FfbError`] plus severity/category classification
//! - [`device`]: [`DeviceStatus`], the status code reported by the wrapped device layer
//! - [`config`]: configuration loading and rule parsing errors
//!
//! Registry misses are not errors: lookups return `Option` and a miss is `None`.
//!
//! # Example
//!
//! ```
//! use joyshim_errors::prelude::*;
//!
//! fn forward(status: i32) -> Result<()> {
//!     if status < 0 {
//!         return Err(DeviceStatus::new("Start", status).into());
//!     }
//!     Ok(())
//! }
//!
//! let err = forward(DeviceStatus::INPUT_LOST).err();
//! assert!(matches!(err, Some(FfbError::Underlying(_))));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod device;
pub mod prelude;

pub use common::{ErrorCategory, ErrorSeverity, FfbError};
pub use config::ConfigError;
pub use device::DeviceStatus;

/// A specialized `Result` type for policy and lifecycle operations.
pub type Result<T> = std::result::Result<T, FfbError>;

/// Result type returned by the wrapped device layer.
pub type DeviceResult<T = ()> = std::result::Result<T, DeviceStatus>;
