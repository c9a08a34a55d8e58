//! Effect state registry for force feedback replay
//!
//! Remembers, per device and effect kind, the last parameters an
//! application set and whether the effect was running, so a re-created
//! effect can be restored after the device reconnects.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod record;
pub mod registry;

pub use record::{EffectStateRecord, RunState};
pub use registry::{EffectStateRegistry, device_key};
