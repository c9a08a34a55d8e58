//! Concurrency tests for the effect state registry.

use std::sync::Arc;
use std::thread;

use joyshim_ffb::{EffectKind, ForceDescriptor};
use joyshim_registry::{EffectStateRegistry, RunState};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_concurrent_devices() -> TestResult {
    let registry = Arc::new(EffectStateRegistry::new());
    let mut handles = vec![];

    for i in 0..8u32 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            let device = format!("Device {i}");
            for kind in EffectKind::KNOWN {
                registry.record_params(&device, kind, &ForceDescriptor::constant(i32::try_from(i).unwrap_or(0)));
                registry.record_start(&device, kind, i, 0);
            }
        }));
    }

    for handle in handles {
        assert!(handle.join().is_ok(), "Thread should not panic");
    }

    assert_eq!(registry.device_count(), 8);
    assert_eq!(registry.record_count(), 8 * EffectKind::KNOWN.len());
    assert_eq!(
        registry.was_running("device 5", EffectKind::Friction),
        Some(RunState { iterations: 5, flags: 0 })
    );
    Ok(())
}

#[test]
fn test_concurrent_start_stop_same_record() -> TestResult {
    let registry = Arc::new(EffectStateRegistry::new());
    let mut handles = vec![];

    for t in 0..4u32 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for n in 0..200u32 {
                if n % 2 == 0 {
                    registry.record_start("Shared Stick", EffectKind::Sine, t, n);
                } else {
                    registry.record_stop("Shared Stick", EffectKind::Sine);
                }
            }
        }));
    }

    for handle in handles {
        assert!(handle.join().is_ok(), "Thread should not panic");
    }

    // One record regardless of interleaving; its run state is whole.
    assert_eq!(registry.record_count(), 1);
    let record = registry
        .get_record("shared stick", EffectKind::Sine)
        .ok_or("record missing")?;
    assert!(record.last_iterations < 4);
    assert_eq!(record.last_start_flags % 2, 0);
    Ok(())
}

#[test]
fn test_clear_during_writes() {
    let registry = Arc::new(EffectStateRegistry::new());

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for n in 0..500u32 {
                registry.record_start("Stick", EffectKind::Damper, n, 0);
            }
        })
    };
    let clearer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..100 {
                registry.clear_device("STICK");
            }
        })
    };

    assert!(writer.join().is_ok());
    assert!(clearer.join().is_ok());
    assert!(registry.record_count() <= 1);
}

#[test]
fn test_stored_copy_is_independent() -> TestResult {
    let registry = EffectStateRegistry::new();
    let mut desc = ForceDescriptor::constant(4000).with_axes(&[(0, 0), (4, 9000)]);
    registry.record_params("Stick", EffectKind::ConstantForce, &desc);

    desc.axes.clear();
    desc.directions.push(1);

    let stored = registry
        .get_record("Stick", EffectKind::ConstantForce)
        .and_then(|r| r.last_descriptor)
        .ok_or("descriptor missing")?;
    assert_eq!(stored.axes, vec![0, 4]);
    assert_eq!(stored.directions, vec![0, 9000]);
    assert!(stored.check().is_ok());
    Ok(())
}

#[test]
fn test_record_snapshot() -> TestResult {
    let registry = EffectStateRegistry::new();
    registry.record_params("Stick", EffectKind::RampForce, &ForceDescriptor::ramp(-100, 100));
    registry.record_start("Stick", EffectKind::RampForce, 1, 0);

    let record = registry
        .get_record("Stick", EffectKind::RampForce)
        .ok_or("record missing")?;
    insta::assert_json_snapshot!(record, @r###"
    {
      "kind": "RampForce",
      "running": true,
      "last_iterations": 1,
      "last_start_flags": 0,
      "last_descriptor": {
        "flags": 18,
        "duration": 0,
        "sample_period": 0,
        "gain": 10000,
        "trigger_button": 4294967295,
        "trigger_repeat_interval": 0,
        "start_delay": 0,
        "axes": [],
        "directions": [],
        "envelope": null,
        "params": {
          "Ramp": {
            "start": -100,
            "end": 100
          }
        }
      }
    }
    "###);
    Ok(())
}
