//! Policy-gated force feedback effect lifecycle
//!
//! Sits between an application and a force feedback device. Every effect
//! and device-level force feedback call is checked against the device's
//! resolved policy: blocked devices accept and drop force feedback,
//! attenuated devices receive scaled parameters. Effect state is recorded
//! so it can be replayed when an effect is re-created after the device
//! reconnects.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod controller;
pub mod device;
pub mod effect;
pub mod filter;
pub mod mock;
pub mod shim;

pub use controller::DeviceController;
pub use device::{ForceFeedbackDevice, ForceFeedbackEffect};
pub use effect::{EffectState, ManagedEffect};
pub use filter::{ControllerOptions, PolicyFilter};
pub use shim::FfbShim;
