use std::collections::HashSet;

use tracing::{debug, info};

use crate::channel::SerialChannel;
use crate::correlator::{CorrelationError, ReplyCorrelator};
use crate::protocol::{opcode, Command, DEVICE_MODE_FLAGS};

/// The T-MM controller line addresses at most this many devices.
/// Informational; registration does not enforce it.
pub const MAX_DEVICES: usize = 2;

/// Tracks which axis addresses are active on the line. Owned by the
/// controller; there is no process-wide device table.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    active: HashSet<u8>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `axis` active and applies the device-mode setting
    /// (auto-reply off, backlash correction on). The mode command is
    /// fire-and-forget; the setting is non-volatile, so it is re-applied
    /// on every registration rather than trusted from a previous run.
    /// Idempotent.
    pub async fn register<C: SerialChannel>(
        &mut self,
        axis: u8,
        correlator: &mut ReplyCorrelator<C>,
    ) -> Result<(), CorrelationError> {
        self.active.insert(axis);
        let mode = Command::new(axis, opcode::SET_DEVICE_MODE, DEVICE_MODE_FLAGS);
        correlator.post(&mode).await?;
        info!(axis, "Registered axis, device mode applied");
        Ok(())
    }

    /// Removes `axis` from the active set. Deregistering an axis that
    /// was never registered is a silent no-op.
    pub fn deregister(&mut self, axis: u8) {
        if self.active.remove(&axis) {
            info!(axis, "Deregistered axis");
        } else {
            debug!(axis, "Deregister of inactive axis ignored");
        }
    }

    pub fn is_active(&self, axis: u8) -> bool {
        self.active.contains(&axis)
    }

    pub fn active_axes(&self) -> Vec<u8> {
        let mut axes: Vec<u8> = self.active.iter().copied().collect();
        axes.sort_unstable();
        axes
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
