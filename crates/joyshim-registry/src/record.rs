//! Cached effect state.

use joyshim_ffb::{EffectKind, ForceDescriptor};
use serde::{Deserialize, Serialize};

/// Last known state of one effect kind on one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStateRecord {
    pub kind: EffectKind,
    pub running: bool,
    pub last_iterations: u32,
    pub last_start_flags: u32,
    /// Unscaled parameters as last set by the application.
    pub last_descriptor: Option<ForceDescriptor>,
}

impl EffectStateRecord {
    /// Empty record: stopped, never parameterized.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            running: false,
            last_iterations: 0,
            last_start_flags: 0,
            last_descriptor: None,
        }
    }

    /// Run state to replay, if the effect was running.
    pub fn run_state(&self) -> Option<RunState> {
        self.running.then_some(RunState {
            iterations: self.last_iterations,
            flags: self.last_start_flags,
        })
    }
}

/// Arguments of the last successful start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunState {
    pub iterations: u32,
    pub flags: u32,
}
