//! Policy-gated effect handle.

use core::fmt;
use std::sync::Arc;

use joyshim_errors::{FfbError, Result};
use joyshim_ffb::{EffectKind, EffectStatus, ForceDescriptor, PARAM_ALL, PARAM_START};
use joyshim_registry::EffectStateRecord;

use crate::device::ForceFeedbackEffect;
use crate::filter::PolicyFilter;

/// Lifecycle of a managed effect.
///
/// `Created -> Parameterized <-> Running -> Stopped`, with `Destroyed`
/// reachable from every state and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectState {
    Created,
    Parameterized,
    Running,
    Stopped,
    Destroyed,
}

impl fmt::Display for EffectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectState::Created => "created",
            EffectState::Parameterized => "parameterized",
            EffectState::Running => "running",
            EffectState::Stopped => "stopped",
            EffectState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Effect wrapper that applies the device policy to every operation.
///
/// An effect without an underlying resource is *inert*: it exists only
/// because creation failed on a blocked device, and every operation on it
/// succeeds without doing anything.
pub struct ManagedEffect {
    kind: EffectKind,
    filter: Arc<PolicyFilter>,
    real: Option<Box<dyn ForceFeedbackEffect>>,
    state: EffectState,
}

impl fmt::Debug for ManagedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedEffect")
            .field("kind", &self.kind)
            .field("device", &self.filter.device_name())
            .field("inert", &self.real.is_none())
            .field("state", &self.state)
            .finish()
    }
}

impl ManagedEffect {
    pub(crate) fn wrap(
        kind: EffectKind,
        filter: Arc<PolicyFilter>,
        real: Box<dyn ForceFeedbackEffect>,
        parameterized: bool,
    ) -> Self {
        Self {
            kind,
            filter,
            real: Some(real),
            state: initial_state(parameterized),
        }
    }

    pub(crate) fn inert(kind: EffectKind, filter: Arc<PolicyFilter>, parameterized: bool) -> Self {
        Self {
            kind,
            filter,
            real: None,
            state: initial_state(parameterized),
        }
    }

    /// Effect kind the instance was created with.
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    /// Whether the effect has no underlying resource.
    pub fn is_inert(&self) -> bool {
        self.real.is_none()
    }

    pub fn device_name(&self) -> &str {
        self.filter.device_name()
    }

    /// Applies `descriptor` to the effect.
    ///
    /// On a blocked device the call is accepted and dropped. Otherwise the
    /// scaled descriptor is forwarded and, on success, the unscaled one is
    /// recorded for replay.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] for a malformed or mismatched
    /// descriptor or a destroyed effect; [`FfbError::Underlying`] when the
    /// device rejects the parameters.
    pub fn set_parameters(&mut self, descriptor: &ForceDescriptor, flags: u32) -> Result<()> {
        self.ensure_alive("set_parameters")?;
        descriptor.check_for(self.kind)?;

        if self.filter.log_effects() {
            tracing::debug!(
                device = %self.filter.device_name(),
                kind = %self.kind,
                policy = %self.filter.policy(),
                flags = format_args!("{flags:#x}"),
                gain = descriptor.gain,
                duration = descriptor.duration,
                sample_period = descriptor.sample_period,
                axes = descriptor.axis_count(),
                "Set effect parameters"
            );
        }

        let Some(real) = forward_target(&self.filter, &mut self.real) else {
            self.advance_on_parameters(flags);
            return Ok(());
        };

        let scaled = self.filter.scale(descriptor, self.kind);
        real.set_parameters(&scaled, flags)?;

        self.filter
            .registry()
            .record_params(self.filter.device_name(), self.kind, descriptor);
        self.advance_on_parameters(flags);
        Ok(())
    }

    /// Current parameters as reported by the device.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure.
    pub fn parameters(&self, flags: u32) -> Result<ForceDescriptor> {
        self.ensure_alive("parameters")?;
        match &self.real {
            Some(real) => Ok(real.parameters(flags)?),
            None => Ok(ForceDescriptor::default()),
        }
    }

    /// Starts the effect.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure when the policy allows force feedback.
    pub fn start(&mut self, iterations: u32, flags: u32) -> Result<()> {
        self.ensure_alive("start")?;

        if self.filter.log_effects() {
            tracing::info!(
                device = %self.filter.device_name(),
                kind = %self.kind,
                policy = %self.filter.policy(),
                iterations,
                flags = format_args!("{flags:#x}"),
                "Effect start"
            );
        }

        let Some(real) = forward_target(&self.filter, &mut self.real) else {
            self.state = EffectState::Running;
            return Ok(());
        };

        real.start(iterations, flags)?;
        self.filter
            .registry()
            .record_start(self.filter.device_name(), self.kind, iterations, flags);
        self.state = EffectState::Running;
        Ok(())
    }

    /// Stops the effect.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure when the policy allows force feedback.
    pub fn stop(&mut self) -> Result<()> {
        self.ensure_alive("stop")?;

        if self.filter.log_effects() {
            tracing::info!(
                device = %self.filter.device_name(),
                kind = %self.kind,
                policy = %self.filter.policy(),
                "Effect stop"
            );
        }

        let Some(real) = forward_target(&self.filter, &mut self.real) else {
            self.state = EffectState::Stopped;
            return Ok(());
        };

        real.stop()?;
        self.filter
            .registry()
            .record_stop(self.filter.device_name(), self.kind);
        self.state = EffectState::Stopped;
        Ok(())
    }

    /// Playback status; always empty on a blocked device.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure.
    pub fn status(&self) -> Result<EffectStatus> {
        self.ensure_alive("status")?;
        match &self.real {
            Some(real) if self.filter.is_enabled() => Ok(real.status()?),
            _ => Ok(EffectStatus::empty()),
        }
    }

    /// Downloads the effect to the device.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure when the policy allows force feedback.
    pub fn download(&mut self) -> Result<()> {
        self.ensure_alive("download")?;
        match forward_target(&self.filter, &mut self.real) {
            Some(real) => Ok(real.download()?),
            None => Ok(()),
        }
    }

    /// Unloads the effect from the device, whatever the policy.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure.
    pub fn unload(&mut self) -> Result<()> {
        self.ensure_alive("unload")?;
        let Some(real) = self.real.as_mut() else {
            return Ok(());
        };
        real.unload()?;
        if self.state == EffectState::Running {
            self.state = EffectState::Stopped;
        }
        Ok(())
    }

    /// Passes a driver-specific escape through; inert effects return an
    /// empty buffer.
    ///
    /// # Errors
    ///
    /// [`FfbError::InvalidArgument`] on a destroyed effect, or the device's
    /// failure.
    pub fn escape(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.ensure_alive("escape")?;
        match self.real.as_mut() {
            Some(real) => Ok(real.escape(payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Releases the underlying effect. Further operations fail.
    pub fn destroy(&mut self) {
        if self.state == EffectState::Destroyed {
            return;
        }
        self.real = None;
        self.state = EffectState::Destroyed;
        tracing::debug!(
            device = %self.filter.device_name(),
            kind = %self.kind,
            "Effect destroyed"
        );
    }

    /// Re-applies recorded state after creation. Failures are logged only.
    pub(crate) fn replay(&mut self, record: &EffectStateRecord) {
        let Some(real) = self.real.as_mut() else {
            return;
        };
        let device = self.filter.device_name();

        if let Some(descriptor) = &record.last_descriptor {
            let scaled = self.filter.scale(descriptor, self.kind);
            match real.set_parameters(&scaled, PARAM_ALL) {
                Ok(()) => {
                    self.state = EffectState::Parameterized;
                    tracing::debug!(
                        device = %device,
                        kind = %self.kind,
                        scale = self.filter.policy().scale_percent,
                        "Replayed effect parameters"
                    );
                }
                Err(status) => {
                    tracing::warn!(
                        device = %device,
                        kind = %self.kind,
                        error = %status,
                        "Failed to replay effect parameters"
                    );
                }
            }
        }

        if let Some(run) = record.run_state() {
            match real.start(run.iterations, run.flags) {
                Ok(()) => {
                    self.state = EffectState::Running;
                    tracing::debug!(
                        device = %device,
                        kind = %self.kind,
                        iterations = run.iterations,
                        flags = format_args!("{:#x}", run.flags),
                        "Restarted effect"
                    );
                }
                Err(status) => {
                    tracing::warn!(
                        device = %device,
                        kind = %self.kind,
                        error = %status,
                        "Failed to restart effect"
                    );
                }
            }
        }
    }

    fn advance_on_parameters(&mut self, flags: u32) {
        if flags & PARAM_START != 0 {
            self.state = EffectState::Running;
        } else if self.state != EffectState::Running {
            self.state = EffectState::Parameterized;
        }
    }

    fn ensure_alive(&self, operation: &str) -> Result<()> {
        if self.state == EffectState::Destroyed {
            return Err(FfbError::invalid_argument(format!(
                "{operation} on destroyed {} effect",
                self.kind
            )));
        }
        Ok(())
    }
}

impl Drop for ManagedEffect {
    fn drop(&mut self) {
        if self.state != EffectState::Destroyed {
            tracing::debug!(
                device = %self.filter.device_name(),
                kind = %self.kind,
                state = %self.state,
                "Effect released"
            );
        }
    }
}

/// Underlying effect when the policy lets calls through.
fn forward_target<'a>(
    filter: &PolicyFilter,
    real: &'a mut Option<Box<dyn ForceFeedbackEffect>>,
) -> Option<&'a mut Box<dyn ForceFeedbackEffect>> {
    if filter.is_enabled() {
        real.as_mut()
    } else {
        None
    }
}

fn initial_state(parameterized: bool) -> EffectState {
    if parameterized {
        EffectState::Parameterized
    } else {
        EffectState::Created
    }
}
