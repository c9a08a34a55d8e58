//! Force Feedback (FFB) effect descriptors and policy scaling
//!
//! This crate models the parameter blocks a game hands to a force feedback
//! device as owned, tagged values, and scales their force magnitudes down
//! to a per-device percentage.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod constants;
pub mod descriptor;
pub mod device;
pub mod effects;
pub mod scale;

pub use constants::*;
pub use descriptor::*;
pub use device::*;
pub use effects::*;
pub use scale::{scale, scale_for, scale_in_place, scale_signed, scale_unsigned};
