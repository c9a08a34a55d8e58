//! Policy scaling of force descriptors.
//!
//! Every force-like field becomes `trunc(value * percent / 100)`, computed in
//! widened integer arithmetic so the result truncates toward zero exactly
//! (`10000 @ 33% == 3300`, `-7 @ 50% == -3`). Positional fields (offsets,
//! phases, periods, deadbands, axes, directions, envelope) are never touched.
//! The integer form is deliberate: a single-precision factor would give
//! `10000 @ 29% == 2899` where this gives 2900, so do not swap in floats.
//!
//! [`scale`] picks its rules from the parameter block. [`scale_for`] picks
//! them from the effect kind, and an unrecognised kind only has its common
//! `gain` scaled whatever block it carries.
//!
//! Scaling does not compose: `scale(scale(d, a), b)` can differ from
//! `scale(d, a * b / 100)` by the truncation of the intermediate step.

use std::borrow::Cow;

use crate::constants::FULL_SCALE_PERCENT;
use crate::descriptor::{ForceDescriptor, TypeSpecificParams};
use crate::effects::{EffectKind, ParamFamily};

/// Scales a signed force value by `percent` (clamped to 100).
pub fn scale_signed(value: i32, percent: u8) -> i32 {
    let percent = i64::from(percent.min(FULL_SCALE_PERCENT));
    let scaled = i64::from(value) * percent / 100;
    i32::try_from(scaled).unwrap_or(value)
}

/// Scales an unsigned force value by `percent` (clamped to 100).
pub fn scale_unsigned(value: u32, percent: u8) -> u32 {
    let percent = u64::from(percent.min(FULL_SCALE_PERCENT));
    let scaled = u64::from(value) * percent / 100;
    u32::try_from(scaled).unwrap_or(value)
}

/// Returns `descriptor` with its force magnitudes scaled to `percent`.
///
/// At 100% or more the input is returned borrowed and bit-identical.
///
/// # Examples
///
/// ```
/// use joyshim_ffb::{scale, ForceDescriptor, TypeSpecificParams, ConstantForce};
///
/// let desc = ForceDescriptor::constant(10_000);
/// let half = scale(&desc, 50);
/// assert_eq!(half.params, TypeSpecificParams::Constant(ConstantForce { magnitude: 5000 }));
///
/// let third = scale(&desc, 33);
/// assert_eq!(third.params, TypeSpecificParams::Constant(ConstantForce { magnitude: 3300 }));
///
/// // Full strength is a pass-through borrow.
/// assert!(matches!(scale(&desc, 100), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn scale(descriptor: &ForceDescriptor, percent: u8) -> Cow<'_, ForceDescriptor> {
    if percent >= FULL_SCALE_PERCENT {
        return Cow::Borrowed(descriptor);
    }
    let mut scaled = descriptor.clone();
    scale_in_place(&mut scaled, percent);
    Cow::Owned(scaled)
}

/// Scales `descriptor` as an effect of `kind` would be scaled.
///
/// Same as [`scale`] for every recognised kind. An [`EffectKind::Other`]
/// effect only has `gain` scaled; its parameter block is forwarded as-is.
///
/// # Examples
///
/// ```
/// use joyshim_ffb::{scale_for, EffectKind, ForceDescriptor};
///
/// let desc = ForceDescriptor::constant(10_000);
/// let scaled = scale_for(&desc, EffectKind::Other(0x77), 50);
/// assert_eq!(scaled.gain, 5000);
/// assert_eq!(scaled.params, desc.params);
/// ```
pub fn scale_for(
    descriptor: &ForceDescriptor,
    kind: EffectKind,
    percent: u8,
) -> Cow<'_, ForceDescriptor> {
    if kind.family() != ParamFamily::Opaque {
        return scale(descriptor, percent);
    }
    if percent >= FULL_SCALE_PERCENT {
        return Cow::Borrowed(descriptor);
    }
    let mut scaled = descriptor.clone();
    scaled.gain = scale_unsigned(scaled.gain, percent);
    Cow::Owned(scaled)
}

/// In-place variant of [`scale`] for callers that own the descriptor.
pub fn scale_in_place(descriptor: &mut ForceDescriptor, percent: u8) {
    if percent >= FULL_SCALE_PERCENT {
        return;
    }

    descriptor.gain = scale_unsigned(descriptor.gain, percent);

    match &mut descriptor.params {
        TypeSpecificParams::Constant(constant) => {
            constant.magnitude = scale_signed(constant.magnitude, percent);
        }
        TypeSpecificParams::Ramp(ramp) => {
            ramp.start = scale_signed(ramp.start, percent);
            ramp.end = scale_signed(ramp.end, percent);
        }
        TypeSpecificParams::Periodic(periodic) => {
            periodic.magnitude = scale_unsigned(periodic.magnitude, percent);
        }
        TypeSpecificParams::Condition(conditions) => {
            for cond in conditions.iter_mut() {
                cond.positive_coefficient = scale_signed(cond.positive_coefficient, percent);
                cond.negative_coefficient = scale_signed(cond.negative_coefficient, percent);
                cond.positive_saturation = scale_unsigned(cond.positive_saturation, percent);
                cond.negative_saturation = scale_unsigned(cond.negative_saturation, percent);
            }
        }
        TypeSpecificParams::Custom(custom) => {
            for sample in custom.samples.iter_mut() {
                *sample = scale_signed(*sample, percent);
            }
        }
        // Unrecognised or absent blocks: only the common gain is scaled.
        TypeSpecificParams::None | TypeSpecificParams::Opaque(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Condition, CustomForce, Envelope, Periodic, RampForce};

    #[test]
    fn test_unknown_kind_scales_gain_only() {
        let desc = ForceDescriptor::ramp(-8000, 8000).with_gain(9000);
        let scaled = scale_for(&desc, EffectKind::Other(0x77), 50);
        assert_eq!(scaled.gain, 4500);
        assert_eq!(scaled.params, TypeSpecificParams::Ramp(RampForce { start: -8000, end: 8000 }));

        let known = scale_for(&desc, EffectKind::RampForce, 50);
        assert_eq!(known.params, TypeSpecificParams::Ramp(RampForce { start: -4000, end: 4000 }));
        assert!(matches!(
            scale_for(&desc, EffectKind::Other(0x77), 100),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_integer_factor_does_not_round_down_early() {
        assert_eq!(scale_signed(10_000, 29), 2900);
        assert_eq!(scale_unsigned(10_000, 57), 5700);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(scale_signed(10_000, 33), 3300);
        assert_eq!(scale_signed(10_000, 50), 5000);
        assert_eq!(scale_signed(-7, 50), -3);
        assert_eq!(scale_signed(7, 50), 3);
        assert_eq!(scale_signed(99, 1), 0);
        assert_eq!(scale_unsigned(9_999, 33), 3299);
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        assert_eq!(scale_signed(i32::MIN, 99), -2_126_008_811);
        assert_eq!(scale_signed(i32::MAX, 99), 2_126_008_810);
        assert_eq!(scale_unsigned(u32::MAX, 99), 4_252_017_622);
        assert_eq!(scale_signed(i32::MIN, 0), 0);
    }

    #[test]
    fn test_percent_above_hundred_is_clamped() {
        assert_eq!(scale_signed(1234, 200), 1234);
        assert_eq!(scale_unsigned(1234, 255), 1234);
    }

    #[test]
    fn test_ramp_scales_both_ends() {
        let desc = ForceDescriptor::ramp(-10_000, 8_000);
        let scaled = scale(&desc, 25);
        assert_eq!(
            scaled.params,
            TypeSpecificParams::Ramp(RampForce {
                start: -2500,
                end: 2000
            })
        );
        assert_eq!(scaled.gain, 2500);
    }

    #[test]
    fn test_periodic_scales_magnitude_only() {
        let original = Periodic {
            magnitude: 6000,
            offset: -1200,
            phase: 9000,
            period: 50_000,
        };
        let desc = ForceDescriptor::periodic(original);
        let scaled = scale(&desc, 50);
        assert_eq!(
            scaled.params,
            TypeSpecificParams::Periodic(Periodic {
                magnitude: 3000,
                ..original
            })
        );
    }

    #[test]
    fn test_condition_keeps_offset_and_deadband() -> Result<(), String> {
        let axis = Condition {
            offset: 1500,
            positive_coefficient: 10_000,
            negative_coefficient: -8000,
            positive_saturation: 10_000,
            negative_saturation: 6000,
            deadband: 300,
        };
        let desc = ForceDescriptor::condition(vec![axis, axis]);
        let scaled = scale(&desc, 10);
        let TypeSpecificParams::Condition(conds) = &scaled.params else {
            return Err(format!("condition block expected, got {:?}", scaled.params));
        };
        assert_eq!(conds.len(), 2);
        for cond in conds {
            assert_eq!(cond.offset, 1500);
            assert_eq!(cond.deadband, 300);
            assert_eq!(cond.positive_coefficient, 1000);
            assert_eq!(cond.negative_coefficient, -800);
            assert_eq!(cond.positive_saturation, 1000);
            assert_eq!(cond.negative_saturation, 600);
        }
        Ok(())
    }

    #[test]
    fn test_custom_scales_every_sample() {
        let desc = ForceDescriptor::custom(CustomForce {
            channels: 2,
            sample_period: 2000,
            samples: vec![100, -100, 10_000, -10_000],
        });
        let scaled = scale(&desc, 50);
        assert_eq!(
            scaled.params,
            TypeSpecificParams::Custom(CustomForce {
                channels: 2,
                sample_period: 2000,
                samples: vec![50, -50, 5000, -5000],
            })
        );
    }

    #[test]
    fn test_opaque_scales_gain_only() {
        let desc = ForceDescriptor::new(TypeSpecificParams::Opaque(vec![0xFF; 8]));
        let scaled = scale(&desc, 40);
        assert_eq!(scaled.gain, 4000);
        assert_eq!(scaled.params, TypeSpecificParams::Opaque(vec![0xFF; 8]));
    }

    #[test]
    fn test_common_positional_fields_untouched() {
        let desc = ForceDescriptor::constant(4000)
            .with_duration(1_000_000)
            .with_sample_period(500)
            .with_axes(&[(0, 4500), (4, -4500)])
            .with_envelope(Envelope {
                attack_level: 10_000,
                attack_time: 100,
                fade_level: 10_000,
                fade_time: 100,
            });
        let scaled = scale(&desc, 20);
        assert_eq!(scaled.duration, desc.duration);
        assert_eq!(scaled.sample_period, desc.sample_period);
        assert_eq!(scaled.axes, desc.axes);
        assert_eq!(scaled.directions, desc.directions);
        assert_eq!(scaled.envelope, desc.envelope);
        assert_eq!(scaled.gain, 2000);
    }

    #[test]
    fn test_full_scale_borrows() {
        let desc = ForceDescriptor::constant(1);
        assert!(matches!(scale(&desc, 100), Cow::Borrowed(_)));
        assert!(matches!(scale(&desc, 150), Cow::Borrowed(_)));
        assert!(matches!(scale(&desc, 99), Cow::Owned(_)));
    }

    #[test]
    fn test_scaling_does_not_compose() {
        // 7 -> 4 -> 2 in two steps, but 7 @ 49% is 3.
        let desc = ForceDescriptor::constant(7);
        let twice = scale(&scale(&desc, 70), 70).into_owned();
        let once = scale(&desc, 49).into_owned();
        assert_ne!(twice.params, once.params);
    }
}
