//! Process-level services shared by every attached device.

use std::sync::Arc;

use joyshim_errors::ConfigError;
use joyshim_policy::{PolicyResolver, ShimConfig};
use joyshim_registry::EffectStateRegistry;

use crate::controller::DeviceController;
use crate::device::ForceFeedbackDevice;
use crate::filter::ControllerOptions;

/// Resolver, registry and options, built once and passed to each device
/// as it is created.
#[derive(Debug, Clone)]
pub struct FfbShim {
    resolver: Arc<PolicyResolver>,
    registry: Arc<EffectStateRegistry>,
    options: ControllerOptions,
}

impl FfbShim {
    pub fn new(resolver: PolicyResolver, options: ControllerOptions) -> Self {
        Self {
            resolver: Arc::new(resolver),
            registry: Arc::new(EffectStateRegistry::new()),
            options,
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] for unparseable device rules.
    pub fn from_config(config: &ShimConfig) -> Result<Self, ConfigError> {
        let resolver = PolicyResolver::from_config(config)?;
        Ok(Self::new(resolver, ControllerOptions::from_config(config)))
    }

    /// Wraps a newly created device in a policy-gated controller.
    pub fn attach<D: ForceFeedbackDevice>(
        &self,
        device: D,
        device_name: impl Into<String>,
    ) -> DeviceController<D> {
        DeviceController::from_resolver(
            device,
            device_name,
            &self.resolver,
            Arc::clone(&self.registry),
            self.options,
        )
    }

    pub fn resolver(&self) -> &PolicyResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &Arc<EffectStateRegistry> {
        &self.registry
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// Forgets recorded effect state for one device.
    pub fn clear_device(&self, device_name: &str) {
        self.registry.clear_device(device_name);
    }

    pub fn clear_all(&self) {
        self.registry.clear_all();
    }
}
