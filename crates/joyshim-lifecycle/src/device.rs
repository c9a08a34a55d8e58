//! Seams implemented by the forwarding layer.

use joyshim_errors::DeviceResult;
use joyshim_ffb::{
    DeviceCapabilities, EffectKind, EffectStatus, FfbCommand, FfbState, ForceDescriptor,
};

/// A force feedback capable input device.
pub trait ForceFeedbackDevice: Send + Sync {
    /// Allocates an effect of `kind`, optionally parameterized at once.
    fn create_effect(
        &self,
        kind: EffectKind,
        initial: Option<&ForceDescriptor>,
    ) -> DeviceResult<Box<dyn ForceFeedbackEffect>>;

    fn capabilities(&self) -> DeviceResult<DeviceCapabilities>;

    fn force_feedback_state(&self) -> DeviceResult<FfbState>;

    fn send_command(&self, command: FfbCommand) -> DeviceResult;
}

/// An effect allocated on a device.
pub trait ForceFeedbackEffect: Send + Sync {
    fn set_parameters(&mut self, descriptor: &ForceDescriptor, flags: u32) -> DeviceResult;

    fn parameters(&self, flags: u32) -> DeviceResult<ForceDescriptor>;

    fn start(&mut self, iterations: u32, flags: u32) -> DeviceResult;

    fn stop(&mut self) -> DeviceResult;

    fn status(&self) -> DeviceResult<EffectStatus>;

    fn download(&mut self) -> DeviceResult;

    fn unload(&mut self) -> DeviceResult;

    /// Driver-specific escape; returns the driver's output buffer.
    fn escape(&mut self, payload: &[u8]) -> DeviceResult<Vec<u8>>;
}
