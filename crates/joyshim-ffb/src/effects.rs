//! FFB effect kinds

use core::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of force feedback effects
///
/// `Other` carries the identifier of an effect type this layer does not
/// recognise; such effects are still forwarded, only their gain is scaled.
///
/// # Examples
///
/// ```
/// use joyshim_ffb::{EffectKind, ParamFamily};
///
/// assert_eq!(EffectKind::Sine.family(), ParamFamily::Periodic);
/// assert_eq!(EffectKind::Inertia.family(), ParamFamily::Condition);
/// assert_eq!(EffectKind::Other(7).name(), "Unknown");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    ConstantForce,
    RampForce,
    Square,
    Sine,
    Triangle,
    SawtoothUp,
    SawtoothDown,
    Spring,
    Damper,
    Inertia,
    Friction,
    CustomForce,
    Other(u32),
}

impl EffectKind {
    /// Every recognised kind, in declaration order.
    pub const KNOWN: [EffectKind; 12] = [
        EffectKind::ConstantForce,
        EffectKind::RampForce,
        EffectKind::Square,
        EffectKind::Sine,
        EffectKind::Triangle,
        EffectKind::SawtoothUp,
        EffectKind::SawtoothDown,
        EffectKind::Spring,
        EffectKind::Damper,
        EffectKind::Inertia,
        EffectKind::Friction,
        EffectKind::CustomForce,
    ];

    /// Type-specific parameter block this kind expects.
    pub fn family(self) -> ParamFamily {
        match self {
            EffectKind::ConstantForce => ParamFamily::Constant,
            EffectKind::RampForce => ParamFamily::Ramp,
            EffectKind::Square
            | EffectKind::Sine
            | EffectKind::Triangle
            | EffectKind::SawtoothUp
            | EffectKind::SawtoothDown => ParamFamily::Periodic,
            EffectKind::Spring | EffectKind::Damper | EffectKind::Inertia | EffectKind::Friction => {
                ParamFamily::Condition
            }
            EffectKind::CustomForce => ParamFamily::Custom,
            EffectKind::Other(_) => ParamFamily::Opaque,
        }
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::ConstantForce => "ConstantForce",
            EffectKind::RampForce => "RampForce",
            EffectKind::Square => "Square",
            EffectKind::Sine => "Sine",
            EffectKind::Triangle => "Triangle",
            EffectKind::SawtoothUp => "SawtoothUp",
            EffectKind::SawtoothDown => "SawtoothDown",
            EffectKind::Spring => "Spring",
            EffectKind::Damper => "Damper",
            EffectKind::Inertia => "Inertia",
            EffectKind::Friction => "Friction",
            EffectKind::CustomForce => "CustomForce",
            EffectKind::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of an effect's type-specific parameter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamFamily {
    Constant,
    Ramp,
    Periodic,
    Condition,
    Custom,
    Opaque,
}
