//! Per-device policy context shared by a controller and its effects.

use std::borrow::Cow;
use std::sync::Arc;

use joyshim_ffb::{EffectKind, ForceDescriptor, scale_for};
use joyshim_policy::{ResolvedPolicy, ShimConfig};
use joyshim_registry::EffectStateRegistry;

/// Behaviour switches independent of the per-device policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Log effect-level operations and device commands.
    pub log_effects: bool,
    /// Replay recorded state when an effect kind is re-created.
    pub auto_restart: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            log_effects: true,
            auto_restart: true,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &ShimConfig) -> Self {
        Self {
            log_effects: config.ffb.log_effects,
            auto_restart: config.ffb.auto_restart,
        }
    }
}

/// Policy, identity and registry handle for one device.
#[derive(Debug)]
pub struct PolicyFilter {
    device_name: String,
    policy: ResolvedPolicy,
    registry: Arc<EffectStateRegistry>,
    options: ControllerOptions,
}

impl PolicyFilter {
    pub fn new(
        device_name: impl Into<String>,
        policy: ResolvedPolicy,
        registry: Arc<EffectStateRegistry>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            policy,
            registry,
            options,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn policy(&self) -> ResolvedPolicy {
        self.policy
    }

    pub fn is_enabled(&self) -> bool {
        self.policy.enabled
    }

    pub fn registry(&self) -> &EffectStateRegistry {
        &self.registry
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn log_effects(&self) -> bool {
        self.options.log_effects
    }

    /// `descriptor` scaled to this device's percentage, by the rules of
    /// `kind`.
    pub fn scale<'a>(
        &self,
        descriptor: &'a ForceDescriptor,
        kind: EffectKind,
    ) -> Cow<'a, ForceDescriptor> {
        scale_for(descriptor, kind, self.policy.scale_percent)
    }
}
