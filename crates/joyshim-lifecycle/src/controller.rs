//! Device-level force feedback gate.

use std::sync::Arc;

use joyshim_errors::Result;
use joyshim_ffb::{DeviceCapabilities, EffectKind, FfbCommand, FfbState, ForceDescriptor};
use joyshim_policy::{PolicyResolver, ResolvedPolicy};
use joyshim_registry::EffectStateRegistry;

use crate::device::ForceFeedbackDevice;
use crate::effect::ManagedEffect;
use crate::filter::{ControllerOptions, PolicyFilter};

/// Wraps one device and routes its force feedback through the policy
/// resolved for its product name.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use joyshim_ffb::{EffectKind, ForceDescriptor};
/// use joyshim_lifecycle::{ControllerOptions, DeviceController, mock::MockDevice};
/// use joyshim_policy::ResolvedPolicy;
/// use joyshim_registry::EffectStateRegistry;
///
/// let registry = Arc::new(EffectStateRegistry::new());
/// let device = MockDevice::new();
/// let controller = DeviceController::new(
///     device.clone(),
///     "Logitech G940 Joystick",
///     ResolvedPolicy::from_percent(50),
///     Arc::clone(&registry),
///     ControllerOptions::default(),
/// );
///
/// let mut effect = controller.create_effect(EffectKind::ConstantForce, None)?;
/// effect.set_parameters(&ForceDescriptor::constant(10_000), 0)?;
///
/// // The device sees half strength, the registry keeps the original.
/// assert_eq!(device.last_parameters(), Some(ForceDescriptor::constant(5000).with_gain(5000)));
/// # Ok::<(), joyshim_errors::FfbError>(())
/// ```
#[derive(Debug)]
pub struct DeviceController<D> {
    device: D,
    filter: Arc<PolicyFilter>,
}

impl<D: ForceFeedbackDevice> DeviceController<D> {
    pub fn new(
        device: D,
        device_name: impl Into<String>,
        policy: ResolvedPolicy,
        registry: Arc<EffectStateRegistry>,
        options: ControllerOptions,
    ) -> Self {
        let filter = PolicyFilter::new(device_name, policy, registry, options);
        tracing::info!(
            device = %filter.device_name(),
            policy = %policy,
            "Device attached"
        );
        Self {
            device,
            filter: Arc::new(filter),
        }
    }

    /// Resolves the policy for `device_name` and wraps `device`.
    pub fn from_resolver(
        device: D,
        device_name: impl Into<String>,
        resolver: &PolicyResolver,
        registry: Arc<EffectStateRegistry>,
        options: ControllerOptions,
    ) -> Self {
        let device_name = device_name.into();
        let policy = resolver.resolve(&device_name);
        Self::new(device, device_name, policy, registry, options)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_name(&self) -> &str {
        self.filter.device_name()
    }

    pub fn policy(&self) -> ResolvedPolicy {
        self.filter.policy()
    }

    pub fn options(&self) -> ControllerOptions {
        self.filter.options()
    }

    /// Creates an effect of `kind`.
    ///
    /// On a blocked device a creation failure yields an inert effect. When
    /// force feedback is allowed and `auto_restart` is on, state recorded
    /// for the same kind is replayed onto the new effect.
    ///
    /// # Errors
    ///
    /// [`joyshim_errors::FfbError::InvalidArgument`] for a malformed or
    /// mismatched initial descriptor; the device's failure when force
    /// feedback is allowed.
    pub fn create_effect(
        &self,
        kind: EffectKind,
        initial: Option<&ForceDescriptor>,
    ) -> Result<ManagedEffect> {
        if let Some(descriptor) = initial {
            descriptor.check_for(kind)?;
        }

        let filter = &self.filter;
        let device = filter.device_name();
        let enabled = filter.is_enabled();
        let prior = filter.registry().get_record(device, kind);

        let forwarded = match initial {
            Some(descriptor) if enabled => Some(filter.scale(descriptor, kind)),
            Some(descriptor) => Some(std::borrow::Cow::Borrowed(descriptor)),
            None => None,
        };

        let mut effect = match self.device.create_effect(kind, forwarded.as_deref()) {
            Ok(real) => ManagedEffect::wrap(kind, Arc::clone(filter), real, initial.is_some()),
            Err(status) if !enabled => {
                tracing::info!(
                    device = %device,
                    kind = %kind,
                    error = %status,
                    "Effect creation failed on blocked device, returning inert effect"
                );
                return Ok(ManagedEffect::inert(kind, Arc::clone(filter), initial.is_some()));
            }
            Err(status) => return Err(status.into()),
        };

        if filter.log_effects() {
            tracing::info!(
                device = %device,
                kind = %kind,
                enabled,
                scale = filter.policy().scale_percent,
                "Effect created"
            );
        }

        if !enabled {
            return Ok(effect);
        }

        let has_prior_descriptor = prior
            .as_ref()
            .is_some_and(|record| record.last_descriptor.is_some());

        if let Some(record) = prior.as_ref().filter(|_| filter.options().auto_restart) {
            tracing::debug!(
                device = %device,
                kind = %kind,
                running = record.running,
                "Replaying recorded effect state"
            );
            effect.replay(record);
        }

        if !has_prior_descriptor
            && let Some(descriptor) = initial
        {
            filter.registry().record_params(device, kind, descriptor);
        }

        Ok(effect)
    }

    /// Device capabilities; force feedback bits are hidden on a blocked
    /// device.
    ///
    /// # Errors
    ///
    /// The device's failure.
    pub fn capabilities(&self) -> Result<DeviceCapabilities> {
        let caps = self.device.capabilities()?;
        if self.filter.is_enabled() {
            return Ok(caps);
        }

        if caps.supports_ffb() {
            tracing::debug!(
                device = %self.filter.device_name(),
                flags = format_args!("{:#x}", caps.flags.bits()),
                "Hiding force feedback capabilities"
            );
        }
        Ok(caps.without_ffb())
    }

    /// Force feedback state; empty on a blocked device.
    ///
    /// # Errors
    ///
    /// The device's failure when force feedback is allowed.
    pub fn force_feedback_state(&self) -> Result<FfbState> {
        if !self.filter.is_enabled() {
            return Ok(FfbState::empty());
        }
        Ok(self.device.force_feedback_state()?)
    }

    /// Sends a device-wide command; swallowed on a blocked device.
    ///
    /// A forwarded reset also forgets the device's recorded effect state.
    ///
    /// # Errors
    ///
    /// The device's failure when force feedback is allowed.
    pub fn send_command(&self, command: FfbCommand) -> Result<()> {
        let enabled = self.filter.is_enabled();
        if self.filter.log_effects() {
            tracing::info!(
                device = %self.filter.device_name(),
                command = %command,
                forwarded = enabled,
                "Force feedback command"
            );
        }

        if !enabled {
            return Ok(());
        }

        self.device.send_command(command)?;
        if command == FfbCommand::Reset {
            self.filter.registry().clear_device(self.filter.device_name());
        }
        Ok(())
    }
}
