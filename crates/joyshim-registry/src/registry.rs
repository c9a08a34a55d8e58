//! Process-wide effect state registry.

use std::collections::HashMap;

use joyshim_ffb::{EffectKind, ForceDescriptor};
use parking_lot::Mutex;

use crate::record::{EffectStateRecord, RunState};

type DeviceEffects = HashMap<EffectKind, EffectStateRecord>;

/// Device key used for every lookup: the lower-cased product name.
pub fn device_key(device: &str) -> String {
    device.to_lowercase()
}

/// Last-known effect state per device and effect kind.
///
/// Shared between controllers through an `Arc`. One mutex guards the whole
/// map; each operation holds it for a single lookup plus one record copy
/// and logs only after the guard is released.
///
/// # Examples
///
/// ```
/// use joyshim_ffb::EffectKind;
/// use joyshim_registry::{EffectStateRegistry, RunState};
///
/// let registry = EffectStateRegistry::new();
/// registry.record_start("Logitech G940", EffectKind::Sine, 1, 0);
///
/// assert_eq!(
///     registry.was_running("LOGITECH g940", EffectKind::Sine),
///     Some(RunState { iterations: 1, flags: 0 })
/// );
///
/// registry.record_stop("Logitech G940", EffectKind::Sine);
/// assert_eq!(registry.was_running("Logitech G940", EffectKind::Sine), None);
/// ```
#[derive(Debug, Default)]
pub struct EffectStateRegistry {
    devices: Mutex<HashMap<String, DeviceEffects>>,
}

impl EffectStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `kind` as running on `device`, creating the record if needed.
    pub fn record_start(&self, device: &str, kind: EffectKind, iterations: u32, flags: u32) {
        let key = device_key(device);
        {
            let mut devices = self.devices.lock();
            let record = devices
                .entry(key.clone())
                .or_default()
                .entry(kind)
                .or_insert_with(|| EffectStateRecord::new(kind));
            record.running = true;
            record.last_iterations = iterations;
            record.last_start_flags = flags;
        }

        tracing::trace!(
            device = %key,
            kind = %kind,
            iterations,
            flags,
            "Recorded effect start"
        );
    }

    /// Marks `kind` as stopped. Unknown effects are ignored.
    pub fn record_stop(&self, device: &str, kind: EffectKind) {
        let key = device_key(device);
        let found = {
            let mut devices = self.devices.lock();
            match devices.get_mut(&key).and_then(|effects| effects.get_mut(&kind)) {
                Some(record) => {
                    record.running = false;
                    true
                }
                None => false,
            }
        };

        tracing::trace!(device = %key, kind = %kind, found, "Recorded effect stop");
    }

    /// Stores an owned copy of `descriptor`, replacing any previous one.
    pub fn record_params(&self, device: &str, kind: EffectKind, descriptor: &ForceDescriptor) {
        let key = device_key(device);
        // Copy before taking the lock.
        let copy = descriptor.clone();
        {
            let mut devices = self.devices.lock();
            devices
                .entry(key.clone())
                .or_default()
                .entry(kind)
                .or_insert_with(|| EffectStateRecord::new(kind))
                .last_descriptor = Some(copy);
        }

        tracing::trace!(device = %key, kind = %kind, "Recorded effect parameters");
    }

    /// Last start arguments if the effect is currently marked running.
    pub fn was_running(&self, device: &str, kind: EffectKind) -> Option<RunState> {
        let key = device_key(device);
        let devices = self.devices.lock();
        devices
            .get(&key)
            .and_then(|effects| effects.get(&kind))
            .and_then(EffectStateRecord::run_state)
    }

    /// Owned copy of the full record.
    pub fn get_record(&self, device: &str, kind: EffectKind) -> Option<EffectStateRecord> {
        let key = device_key(device);
        let devices = self.devices.lock();
        devices
            .get(&key)
            .and_then(|effects| effects.get(&kind))
            .cloned()
    }

    /// Drops every record for `device`.
    pub fn clear_device(&self, device: &str) {
        let key = device_key(device);
        let removed = self
            .devices
            .lock()
            .remove(&key)
            .map_or(0, |effects| effects.len());

        tracing::debug!(device = %key, removed, "Cleared device effect state");
    }

    /// Drops every record for every device.
    pub fn clear_all(&self) {
        let removed = {
            let mut devices = self.devices.lock();
            let count = devices.len();
            devices.clear();
            count
        };

        tracing::debug!(devices = removed, "Cleared all effect state");
    }

    /// Number of devices with at least one record.
    pub fn device_count(&self) -> usize {
        self.devices.lock().len()
    }

    /// Total number of records across all devices.
    pub fn record_count(&self) -> usize {
        self.devices.lock().values().map(HashMap::len).sum()
    }
}
