//! Force effect descriptors
//!
//! A [`ForceDescriptor`] is an owned value: the axis list, directions,
//! envelope and type-specific block all live in their own allocations, so a
//! clone never aliases the source.

use joyshim_errors::{FfbError, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{COORDS_CARTESIAN, NOMINAL_MAX, OBJECT_OFFSETS};
use crate::effects::{EffectKind, ParamFamily};

/// Attack/fade envelope applied on top of an effect's magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Envelope {
    pub attack_level: u32,
    pub attack_time: u32,
    pub fade_level: u32,
    pub fade_time: u32,
}

/// Constant force block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstantForce {
    pub magnitude: i32,
}

/// Ramp force block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RampForce {
    pub start: i32,
    pub end: i32,
}

/// Periodic block. Only `magnitude` is a force; the rest is positional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Periodic {
    pub magnitude: u32,
    pub offset: i32,
    pub phase: u32,
    pub period: u32,
}

/// One axis of a condition effect (spring, damper, inertia, friction).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub offset: i32,
    pub positive_coefficient: i32,
    pub negative_coefficient: i32,
    pub positive_saturation: u32,
    pub negative_saturation: u32,
    pub deadband: u32,
}

impl Condition {
    /// Symmetric condition centred on zero with full saturation.
    pub fn symmetric(coefficient: i32) -> Self {
        Self {
            offset: 0,
            positive_coefficient: coefficient,
            negative_coefficient: coefficient,
            positive_saturation: NOMINAL_MAX,
            negative_saturation: NOMINAL_MAX,
            deadband: 0,
        }
    }
}

/// Custom force block: `samples` holds `channels` interleaved channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomForce {
    pub channels: u32,
    pub sample_period: u32,
    pub samples: Vec<i32>,
}

impl CustomForce {
    /// Samples per channel.
    pub fn sample_count(&self) -> usize {
        match usize::try_from(self.channels) {
            Ok(0) | Err(_) => 0,
            Ok(channels) => self.samples.len() / channels,
        }
    }
}

/// Type-specific parameter block, tagged by its shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSpecificParams {
    #[default]
    None,
    Constant(ConstantForce),
    Ramp(RampForce),
    Periodic(Periodic),
    /// One entry per axis, or a single entry applied to all axes.
    Condition(Vec<Condition>),
    Custom(CustomForce),
    /// Block of an effect type this layer does not interpret.
    Opaque(Vec<u8>),
}

impl TypeSpecificParams {
    /// Shape of this block, `None` when no block is present.
    pub fn family(&self) -> Option<ParamFamily> {
        match self {
            TypeSpecificParams::None => None,
            TypeSpecificParams::Constant(_) => Some(ParamFamily::Constant),
            TypeSpecificParams::Ramp(_) => Some(ParamFamily::Ramp),
            TypeSpecificParams::Periodic(_) => Some(ParamFamily::Periodic),
            TypeSpecificParams::Condition(_) => Some(ParamFamily::Condition),
            TypeSpecificParams::Custom(_) => Some(ParamFamily::Custom),
            TypeSpecificParams::Opaque(_) => Some(ParamFamily::Opaque),
        }
    }

    /// Whether an effect of `kind` can take this block.
    ///
    /// Absent and opaque blocks are accepted by every kind, and an
    /// unrecognised kind accepts any block. Otherwise a typed block must
    /// match the kind's family.
    pub fn fits(&self, kind: EffectKind) -> bool {
        if kind.family() == ParamFamily::Opaque {
            return true;
        }
        match self.family() {
            None | Some(ParamFamily::Opaque) => true,
            Some(family) => family == kind.family(),
        }
    }
}

/// Full parameter set of one force feedback effect.
///
/// # Examples
///
/// ```
/// use joyshim_ffb::{ForceDescriptor, Envelope};
///
/// let desc = ForceDescriptor::constant(5000)
///     .with_gain(8000)
///     .with_duration(500_000)
///     .with_axes(&[(0, 0), (4, 9000)])
///     .with_envelope(Envelope { attack_level: 0, attack_time: 1000, fade_level: 0, fade_time: 1000 });
///
/// assert_eq!(desc.axis_count(), 2);
/// assert!(desc.check().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForceDescriptor {
    pub flags: u32,
    pub duration: u32,
    pub sample_period: u32,
    pub gain: u32,
    pub trigger_button: u32,
    pub trigger_repeat_interval: u32,
    pub start_delay: u32,
    pub axes: Vec<u32>,
    pub directions: Vec<i32>,
    pub envelope: Option<Envelope>,
    pub params: TypeSpecificParams,
}

impl Default for ForceDescriptor {
    fn default() -> Self {
        Self::new(TypeSpecificParams::None)
    }
}

impl ForceDescriptor {
    /// Descriptor at full gain, no axes, no envelope.
    pub fn new(params: TypeSpecificParams) -> Self {
        Self {
            flags: COORDS_CARTESIAN | OBJECT_OFFSETS,
            duration: 0,
            sample_period: 0,
            gain: NOMINAL_MAX,
            trigger_button: u32::MAX,
            trigger_repeat_interval: 0,
            start_delay: 0,
            axes: Vec::new(),
            directions: Vec::new(),
            envelope: None,
            params,
        }
    }

    pub fn constant(magnitude: i32) -> Self {
        Self::new(TypeSpecificParams::Constant(ConstantForce { magnitude }))
    }

    pub fn ramp(start: i32, end: i32) -> Self {
        Self::new(TypeSpecificParams::Ramp(RampForce { start, end }))
    }

    pub fn periodic(periodic: Periodic) -> Self {
        Self::new(TypeSpecificParams::Periodic(periodic))
    }

    pub fn condition(conditions: Vec<Condition>) -> Self {
        Self::new(TypeSpecificParams::Condition(conditions))
    }

    pub fn custom(custom: CustomForce) -> Self {
        Self::new(TypeSpecificParams::Custom(custom))
    }

    pub fn with_gain(mut self, gain: u32) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_period(mut self, sample_period: u32) -> Self {
        self.sample_period = sample_period;
        self
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Replaces axes and directions from `(axis, direction)` pairs.
    pub fn with_axes(mut self, axes: &[(u32, i32)]) -> Self {
        self.axes = axes.iter().map(|&(axis, _)| axis).collect();
        self.directions = axes.iter().map(|&(_, dir)| dir).collect();
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Number of axes the effect is applied to.
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Checks the structural invariants of the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FfbError::InvalidArgument`] when the axis and direction lists
    /// differ in length, or a custom force block is not a whole number of
    /// samples per channel.
    pub fn check(&self) -> Result<()> {
        if self.axes.len() != self.directions.len() {
            return Err(FfbError::invalid_argument(format!(
                "descriptor has {} axes but {} directions",
                self.axes.len(),
                self.directions.len()
            )));
        }
        if let TypeSpecificParams::Custom(custom) = &self.params {
            let channels = usize::try_from(custom.channels).unwrap_or(usize::MAX);
            if channels == 0 && !custom.samples.is_empty() {
                return Err(FfbError::invalid_argument(
                    "custom force has samples but zero channels",
                ));
            }
            if channels != 0 && custom.samples.len() % channels != 0 {
                return Err(FfbError::invalid_argument(format!(
                    "custom force has {} samples, not a multiple of {} channels",
                    custom.samples.len(),
                    custom.channels
                )));
            }
        }
        Ok(())
    }

    /// [`check`](Self::check) plus: the type-specific block must fit `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`FfbError::InvalidArgument`] on any violation.
    pub fn check_for(&self, kind: EffectKind) -> Result<()> {
        self.check()?;
        if !self.params.fits(kind) {
            return Err(FfbError::invalid_argument(format!(
                "{kind} effect cannot take {:?} parameters",
                self.params.family()
            )));
        }
        Ok(())
    }
}
