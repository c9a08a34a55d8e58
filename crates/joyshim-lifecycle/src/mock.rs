//! In-memory device for tests and examples.
//!
//! Clones of a [`MockDevice`] share one call log, so a test can hand a
//! clone to a controller and inspect what reached the device.

use std::collections::HashSet;
use std::sync::Arc;

use joyshim_errors::{DeviceResult, DeviceStatus};
use joyshim_ffb::{
    CapabilityFlags, DeviceCapabilities, EffectKind, EffectStatus, FfbCommand, FfbState,
    ForceDescriptor,
};
use parking_lot::Mutex;

use crate::device::{ForceFeedbackDevice, ForceFeedbackEffect};

/// One call that reached the mock device or one of its effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateEffect {
        kind: EffectKind,
        descriptor: Option<ForceDescriptor>,
    },
    SetParameters {
        kind: EffectKind,
        descriptor: ForceDescriptor,
        flags: u32,
    },
    Parameters {
        kind: EffectKind,
    },
    Start {
        kind: EffectKind,
        iterations: u32,
        flags: u32,
    },
    Stop {
        kind: EffectKind,
    },
    Status {
        kind: EffectKind,
    },
    Download {
        kind: EffectKind,
    },
    Unload {
        kind: EffectKind,
    },
    Escape {
        kind: EffectKind,
        payload: Vec<u8>,
    },
    Capabilities,
    ForceFeedbackState,
    SendCommand(FfbCommand),
}

#[derive(Debug)]
struct MockShared {
    calls: Mutex<Vec<MockCall>>,
    failing: Mutex<HashSet<&'static str>>,
    capabilities: DeviceCapabilities,
    state: FfbState,
}

impl MockShared {
    fn record(&self, call: MockCall) {
        self.calls.lock().push(call);
    }

    fn outcome(&self, operation: &'static str) -> DeviceResult {
        if self.failing.lock().contains(operation) {
            Err(DeviceStatus::failure(operation))
        } else {
            Ok(())
        }
    }
}

/// Force feedback joystick that records every call.
#[derive(Debug, Clone)]
pub struct MockDevice {
    shared: Arc<MockShared>,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    /// Three-axis stick with full force feedback support.
    pub fn new() -> Self {
        Self::with_capabilities(DeviceCapabilities {
            flags: CapabilityFlags::ATTACHED | CapabilityFlags::FFB,
            axes: 3,
            buttons: 12,
            povs: 1,
            ff_sample_period: 1000,
            ff_min_time_resolution: 1000,
            ..DeviceCapabilities::default()
        })
    }

    pub fn with_capabilities(capabilities: DeviceCapabilities) -> Self {
        Self {
            shared: Arc::new(MockShared {
                calls: Mutex::new(Vec::new()),
                failing: Mutex::new(HashSet::new()),
                capabilities,
                state: FfbState::STOPPED | FfbState::ACTUATORS_ON | FfbState::POWER_ON,
            }),
        }
    }

    /// Makes `operation` (a trait method name) fail from now on.
    pub fn fail_on(&self, operation: &'static str) {
        self.shared.failing.lock().insert(operation);
    }

    /// Makes `operation` succeed again.
    pub fn recover(&self, operation: &'static str) {
        self.shared.failing.lock().remove(operation);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.shared.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.shared.calls.lock().clear();
    }

    /// Descriptor of the most recent `set_parameters` or `create_effect`.
    pub fn last_parameters(&self) -> Option<ForceDescriptor> {
        self.shared
            .calls
            .lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                MockCall::SetParameters { descriptor, .. } => Some(descriptor.clone()),
                MockCall::CreateEffect { descriptor, .. } => descriptor.clone(),
                _ => None,
            })
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.shared.calls.lock().iter().filter(|c| predicate(c)).count()
    }
}

impl ForceFeedbackDevice for MockDevice {
    fn create_effect(
        &self,
        kind: EffectKind,
        initial: Option<&ForceDescriptor>,
    ) -> DeviceResult<Box<dyn ForceFeedbackEffect>> {
        self.shared.record(MockCall::CreateEffect {
            kind,
            descriptor: initial.cloned(),
        });
        self.shared.outcome("create_effect")?;
        Ok(Box::new(MockEffect {
            kind,
            shared: Arc::clone(&self.shared),
            parameters: initial.cloned(),
            playing: false,
        }))
    }

    fn capabilities(&self) -> DeviceResult<DeviceCapabilities> {
        self.shared.record(MockCall::Capabilities);
        self.shared.outcome("capabilities")?;
        Ok(self.shared.capabilities)
    }

    fn force_feedback_state(&self) -> DeviceResult<FfbState> {
        self.shared.record(MockCall::ForceFeedbackState);
        self.shared.outcome("force_feedback_state")?;
        Ok(self.shared.state)
    }

    fn send_command(&self, command: FfbCommand) -> DeviceResult {
        self.shared.record(MockCall::SendCommand(command));
        self.shared.outcome("send_command")
    }
}

/// Effect handed out by [`MockDevice`].
#[derive(Debug)]
pub struct MockEffect {
    kind: EffectKind,
    shared: Arc<MockShared>,
    parameters: Option<ForceDescriptor>,
    playing: bool,
}

impl ForceFeedbackEffect for MockEffect {
    fn set_parameters(&mut self, descriptor: &ForceDescriptor, flags: u32) -> DeviceResult {
        self.shared.record(MockCall::SetParameters {
            kind: self.kind,
            descriptor: descriptor.clone(),
            flags,
        });
        self.shared.outcome("set_parameters")?;
        self.parameters = Some(descriptor.clone());
        Ok(())
    }

    fn parameters(&self, _flags: u32) -> DeviceResult<ForceDescriptor> {
        self.shared.record(MockCall::Parameters { kind: self.kind });
        self.shared.outcome("parameters")?;
        Ok(self.parameters.clone().unwrap_or_default())
    }

    fn start(&mut self, iterations: u32, flags: u32) -> DeviceResult {
        self.shared.record(MockCall::Start {
            kind: self.kind,
            iterations,
            flags,
        });
        self.shared.outcome("start")?;
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) -> DeviceResult {
        self.shared.record(MockCall::Stop { kind: self.kind });
        self.shared.outcome("stop")?;
        self.playing = false;
        Ok(())
    }

    fn status(&self) -> DeviceResult<EffectStatus> {
        self.shared.record(MockCall::Status { kind: self.kind });
        self.shared.outcome("status")?;
        Ok(if self.playing {
            EffectStatus::PLAYING
        } else {
            EffectStatus::empty()
        })
    }

    fn download(&mut self) -> DeviceResult {
        self.shared.record(MockCall::Download { kind: self.kind });
        self.shared.outcome("download")
    }

    fn unload(&mut self) -> DeviceResult {
        self.shared.record(MockCall::Unload { kind: self.kind });
        self.shared.outcome("unload")?;
        self.playing = false;
        Ok(())
    }

    fn escape(&mut self, payload: &[u8]) -> DeviceResult<Vec<u8>> {
        self.shared.record(MockCall::Escape {
            kind: self.kind,
            payload: payload.to_vec(),
        });
        self.shared.outcome("escape")?;
        // Echo the payload back reversed.
        Ok(payload.iter().rev().copied().collect())
    }
}
