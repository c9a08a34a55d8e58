//! FFB constants and limits

/// Nominal maximum for gains and magnitudes (full strength)
pub const NOMINAL_MAX: u32 = 10_000;

/// Duration / iteration value meaning "forever"
pub const INFINITE: u32 = u32::MAX;

/// Units per degree for polar and spherical directions
pub const DEGREES: i32 = 100;

/// Microseconds per second, the time unit of durations and envelopes
pub const SECONDS: u32 = 1_000_000;

/// Full-strength scale percentage; at or above this scaling is the identity
pub const FULL_SCALE_PERCENT: u8 = 100;

/// `SetParameters` flags
pub const PARAM_DURATION: u32 = 0x0000_0001;
pub const PARAM_SAMPLE_PERIOD: u32 = 0x0000_0002;
pub const PARAM_GAIN: u32 = 0x0000_0004;
pub const PARAM_TRIGGER_BUTTON: u32 = 0x0000_0008;
pub const PARAM_TRIGGER_REPEAT_INTERVAL: u32 = 0x0000_0010;
pub const PARAM_AXES: u32 = 0x0000_0020;
pub const PARAM_DIRECTION: u32 = 0x0000_0040;
pub const PARAM_ENVELOPE: u32 = 0x0000_0080;
pub const PARAM_TYPE_SPECIFIC: u32 = 0x0000_0100;
pub const PARAM_START_DELAY: u32 = 0x0000_0200;
pub const PARAM_ALL: u32 = 0x0000_03FF;
pub const PARAM_START: u32 = 0x2000_0000;
pub const PARAM_NO_RESTART: u32 = 0x4000_0000;
pub const PARAM_NO_DOWNLOAD: u32 = 0x8000_0000;

/// `Start` flags
pub const START_SOLO: u32 = 0x0000_0001;
pub const START_NO_DOWNLOAD: u32 = 0x8000_0000;

/// Descriptor coordinate flags
pub const COORDS_CARTESIAN: u32 = 0x0000_0010;
pub const COORDS_POLAR: u32 = 0x0000_0020;
pub const COORDS_SPHERICAL: u32 = 0x0000_0040;
pub const OBJECT_IDS: u32 = 0x0000_0001;
pub const OBJECT_OFFSETS: u32 = 0x0000_0002;
