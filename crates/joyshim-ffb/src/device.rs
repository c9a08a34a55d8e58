//! Device-level force feedback types: capabilities, global commands and
//! status flags.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Device capability flags.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u32 {
        const ATTACHED = 0x0000_0001;
        const POLLED_DEVICE = 0x0000_0002;
        const EMULATED = 0x0000_0004;
        const POLLED_DATA_FORMAT = 0x0000_0008;
        const FORCE_FEEDBACK = 0x0000_0100;
        const FF_ATTACK = 0x0000_0200;
        const FF_FADE = 0x0000_0400;
        const SATURATION = 0x0000_0800;
        const POS_NEG_COEFFICIENTS = 0x0000_1000;
        const POS_NEG_SATURATION = 0x0000_2000;
        const DEADBAND = 0x0000_4000;
        const START_DELAY = 0x0000_8000;
        const ALIAS = 0x0001_0000;
        const PHANTOM = 0x0002_0000;
        const HIDDEN = 0x0004_0000;

        /// Everything that advertises force feedback support.
        const FFB = Self::FORCE_FEEDBACK.bits()
            | Self::FF_ATTACK.bits()
            | Self::FF_FADE.bits()
            | Self::SATURATION.bits()
            | Self::POS_NEG_COEFFICIENTS.bits()
            | Self::POS_NEG_SATURATION.bits()
            | Self::DEADBAND.bits()
            | Self::START_DELAY.bits();
    }
}

bitflags! {
    /// Playback status of a single effect.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectStatus: u32 {
        const PLAYING = 0x0000_0001;
        const EMULATED = 0x0000_0002;
    }
}

bitflags! {
    /// Device-wide force feedback state.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FfbState: u32 {
        const EMPTY = 0x0000_0001;
        const STOPPED = 0x0000_0002;
        const PAUSED = 0x0000_0004;
        const ACTUATORS_ON = 0x0000_0010;
        const ACTUATORS_OFF = 0x0000_0020;
        const POWER_ON = 0x0000_0040;
        const POWER_OFF = 0x0000_0080;
        const SAFETY_SWITCH_ON = 0x0000_0100;
        const SAFETY_SWITCH_OFF = 0x0000_0200;
        const USER_FF_SWITCH_ON = 0x0000_0400;
        const USER_FF_SWITCH_OFF = 0x0000_0800;
        const DEVICE_LOST = 0x8000_0000;
    }
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for EffectStatus {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for FfbState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Capabilities reported by a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub flags: CapabilityFlags,
    pub device_type: u32,
    pub axes: u32,
    pub buttons: u32,
    pub povs: u32,
    pub ff_sample_period: u32,
    pub ff_min_time_resolution: u32,
    pub firmware_revision: u32,
    pub hardware_revision: u32,
    pub driver_version: u32,
}

impl DeviceCapabilities {
    pub fn supports_ffb(&self) -> bool {
        self.flags.contains(CapabilityFlags::FORCE_FEEDBACK)
    }

    /// Copy with every force feedback capability removed.
    pub fn without_ffb(mut self) -> Self {
        self.flags.remove(CapabilityFlags::FFB);
        self.ff_sample_period = 0;
        self.ff_min_time_resolution = 0;
        self
    }
}

/// Global force feedback command sent to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfbCommand {
    Reset,
    StopAll,
    Pause,
    Continue,
    ActuatorsOn,
    ActuatorsOff,
    Unknown(u32),
}

impl FfbCommand {
    pub fn from_code(code: u32) -> Self {
        match code {
            0x01 => FfbCommand::Reset,
            0x02 => FfbCommand::StopAll,
            0x04 => FfbCommand::Pause,
            0x08 => FfbCommand::Continue,
            0x10 => FfbCommand::ActuatorsOn,
            0x20 => FfbCommand::ActuatorsOff,
            other => FfbCommand::Unknown(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            FfbCommand::Reset => 0x01,
            FfbCommand::StopAll => 0x02,
            FfbCommand::Pause => 0x04,
            FfbCommand::Continue => 0x08,
            FfbCommand::ActuatorsOn => 0x10,
            FfbCommand::ActuatorsOff => 0x20,
            FfbCommand::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FfbCommand::Reset => "RESET",
            FfbCommand::StopAll => "STOPALL",
            FfbCommand::Pause => "PAUSE",
            FfbCommand::Continue => "CONTINUE",
            FfbCommand::ActuatorsOn => "SETACTUATORSON",
            FfbCommand::ActuatorsOff => "SETACTUATORSOFF",
            FfbCommand::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for FfbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self.name(), self.code())
    }
}
