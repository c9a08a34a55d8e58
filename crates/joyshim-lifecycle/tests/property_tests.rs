//! Property tests for policy gating.

use std::sync::Arc;

use joyshim_ffb::{EffectKind, ForceDescriptor, scale};
use joyshim_lifecycle::mock::{MockCall, MockDevice};
use joyshim_lifecycle::{ControllerOptions, DeviceController};
use joyshim_policy::ResolvedPolicy;
use joyshim_registry::EffectStateRegistry;
use proptest::prelude::*;

fn controller(percent: i64) -> (MockDevice, Arc<EffectStateRegistry>, DeviceController<MockDevice>) {
    let device = MockDevice::new();
    let registry = Arc::new(EffectStateRegistry::new());
    let controller = DeviceController::new(
        device.clone(),
        "Prop Stick",
        ResolvedPolicy::from_percent(percent),
        Arc::clone(&registry),
        ControllerOptions::default(),
    );
    (device, registry, controller)
}

proptest! {
    #[test]
    fn prop_device_sees_scaled_registry_keeps_original(
        magnitude in any::<i32>(),
        gain in 0u32..=10_000,
        percent in 1i64..=100,
    ) {
        let (device, registry, controller) = controller(percent);
        let original = ForceDescriptor::constant(magnitude).with_gain(gain);

        let mut effect = controller
            .create_effect(EffectKind::ConstantForce, None)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        effect
            .set_parameters(&original, 0)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let expected = scale(&original, controller.policy().scale_percent).into_owned();
        prop_assert_eq!(device.last_parameters(), Some(expected));

        let recorded = registry
            .get_record("prop stick", EffectKind::ConstantForce)
            .and_then(|r| r.last_descriptor);
        prop_assert_eq!(recorded, Some(original));
    }

    #[test]
    fn prop_blocked_device_receives_no_force_calls(
        iterations in any::<u32>(),
        flags in any::<u32>(),
        magnitude in any::<i32>(),
        percent in -100i64..=0,
    ) {
        let (device, registry, controller) = controller(percent);
        let mut effect = controller
            .create_effect(EffectKind::ConstantForce, None)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert!(effect.set_parameters(&ForceDescriptor::constant(magnitude), flags).is_ok());
        prop_assert!(effect.start(iterations, flags).is_ok());
        prop_assert!(effect.stop().is_ok());

        prop_assert_eq!(
            device.count(|c| !matches!(c, MockCall::CreateEffect { .. })),
            0
        );
        prop_assert_eq!(registry.record_count(), 0);
    }
}
