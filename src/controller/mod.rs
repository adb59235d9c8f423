pub mod instruction;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::axis::{AxisStateInfo, MotionState};
use crate::channel::SerialChannel;
use crate::correlator::{CorrelationError, ExchangePolicy, ReplyCorrelator};
use crate::protocol::{opcode, Command};
use crate::registry::DeviceRegistry;

use instruction::{Instruction, InstructionError};

/// Status polls ride out slow settling on real hardware, which can
/// take several 200 ms cycles to answer.
const STATUS_POLICY: ExchangePolicy = ExchangePolicy::new(100, Duration::from_millis(200));
/// Position reads give up much sooner and fall back to stale data.
const POSITION_POLICY: ExchangePolicy = ExchangePolicy::new(50, Duration::from_millis(50));

/// Result of a position read. `Stale` carries the payload of the last
/// frame seen on the wire when no reply correlated within budget; it
/// may answer some earlier command and should be treated accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionReading {
    Fresh(i32),
    Stale(i32),
}

impl PositionReading {
    pub fn value(self) -> i32 {
        match self {
            PositionReading::Fresh(v) | PositionReading::Stale(v) => v,
        }
    }

    pub fn is_fresh(self) -> bool {
        matches!(self, PositionReading::Fresh(_))
    }
}

/// The motion facade for one serial line of Zaber stages. Owns the
/// correlator and the device registry; all device traffic goes through
/// here. Operations block the caller for the duration of the write and
/// the bounded retry-read loop, and must not be invoked concurrently.
pub struct ZaberController<C> {
    correlator: ReplyCorrelator<C>,
    registry: DeviceRegistry,
}

impl<C: SerialChannel> ZaberController<C> {
    pub fn new(channel: C) -> Self {
        Self {
            correlator: ReplyCorrelator::new(channel),
            registry: DeviceRegistry::new(),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Activates `axis` and pushes the device-mode configuration.
    pub async fn add_device(&mut self, axis: u8) -> Result<()> {
        self.registry
            .register(axis, &mut self.correlator)
            .await
            .with_context(|| format!("failed to register axis {}", axis))
    }

    /// Deactivates `axis`. Unknown axes are ignored.
    pub fn remove_device(&mut self, axis: u8) {
        self.registry.deregister(axis);
    }

    /// Polls the device status (opcode 54) and derives the motion
    /// state. Correlation exhaustion is an error here: a stage whose
    /// status cannot be read is not safely in any state.
    pub async fn query_status(&mut self, axis: u8) -> Result<AxisStateInfo> {
        let command = Command::bare(axis, opcode::QUERY_STATUS);
        let reply = self
            .correlator
            .exchange(&command, STATUS_POLICY)
            .await
            .with_context(|| format!("status query for axis {} failed", axis))?;

        let state = MotionState::from_status(reply.data);
        let message = match state {
            MotionState::Idle => "Zaber is idle",
            MotionState::Moving => "Zaber is moving",
            _ => "Zaber is faulty",
        };
        Ok(AxisStateInfo::new(state).with_message(message.to_string()))
    }

    /// Reads the current position (opcode 60). If no reply correlates
    /// within budget but some frame was seen, its payload is returned
    /// tagged [`PositionReading::Stale`] rather than silently passed
    /// off as fresh. A completely silent device is an error.
    pub async fn read_position(&mut self, axis: u8) -> Result<PositionReading> {
        let command = Command::bare(axis, opcode::QUERY_POSITION);
        match self.correlator.exchange(&command, POSITION_POLICY).await {
            Ok(reply) => Ok(PositionReading::Fresh(reply.data)),
            Err(CorrelationError::Unresponsive {
                attempts,
                last_reply: Some(last),
            }) => {
                warn!(
                    axis,
                    attempts,
                    stale = last.data,
                    "Position read did not correlate, reporting stale data"
                );
                Ok(PositionReading::Stale(last.data))
            }
            Err(err) => Err(err).with_context(|| format!("position read for axis {} failed", axis)),
        }
    }

    /// Starts an absolute move (opcode 20). Fire-and-forget: the write
    /// succeeding says nothing about the move completing; poll
    /// [`query_status`](Self::query_status) for that.
    pub async fn start_move(&mut self, axis: u8, target: i32) -> Result<()> {
        info!(axis, target, "Starting absolute move");
        self.correlator
            .post(&Command::new(axis, opcode::MOVE_ABSOLUTE, target))
            .await
            .with_context(|| format!("move command for axis {} failed", axis))
    }

    /// Stops the axis (opcode 23). Fire-and-forget.
    pub async fn stop_move(&mut self, axis: u8) -> Result<()> {
        info!(axis, "Stopping axis");
        self.correlator
            .post(&Command::bare(axis, opcode::STOP))
            .await
            .with_context(|| format!("stop command for axis {} failed", axis))
    }

    /// Identical to [`stop_move`](Self::stop_move); the protocol has a
    /// single stop opcode and no separate hard-abort.
    pub async fn abort_move(&mut self, axis: u8) -> Result<()> {
        self.stop_move(axis).await
    }

    /// Initiates homing (opcode 1). Fire-and-forget: success means the
    /// command went out, not that the stage reached home.
    pub async fn home(&mut self, axis: u8) -> Result<()> {
        info!(axis, "Starting homing");
        self.correlator
            .post(&Command::bare(axis, opcode::HOME))
            .await
            .with_context(|| format!("homing command for axis {} failed", axis))
    }

    /// Entry point for free-text host commands. Always returns a plain
    /// string so the calling framework layer never sees a structured
    /// error: `"[DONE]"` on success, `"Error"` when a recognized
    /// instruction could not be carried out, and an explicit
    /// invalid-command message for unknown instruction names.
    pub async fn send_to_ctrl(&mut self, line: &str) -> String {
        match Instruction::parse(line) {
            Ok(Instruction::Homing { axis }) => match self.home(axis).await {
                Ok(()) => "[DONE]".to_string(),
                Err(err) => {
                    error!(axis, error = %err, "Homing command failed");
                    "Error".to_string()
                }
            },
            Err(InstructionError::InvalidArguments(msg)) => {
                error!(instruction = line, %msg, "Rejected malformed instruction");
                "Error".to_string()
            }
            Err(InstructionError::Unknown(name)) => {
                warn!(instruction = %name, "Invalid command requested");
                "ERROR: Invalid command requested.".to_string()
            }
        }
    }
}
