use super::limit_switches::LimitSwitches;
use super::state::MotionState;

/// Snapshot returned by a status query: the derived motion state, a
/// human-readable message for the host, and limit-switch info.
#[derive(Debug, Clone)]
pub struct AxisStateInfo {
    pub state: MotionState,
    pub message: Option<String>,
    pub limit_switches: LimitSwitches,
}

impl AxisStateInfo {
    pub fn new(state: MotionState) -> Self {
        Self {
            state,
            message: None,
            limit_switches: LimitSwitches::None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    pub fn is_faulted(&self) -> bool {
        self.state == MotionState::Fault
    }

    pub fn is_ready(&self) -> bool {
        self.state == MotionState::Idle && !self.limit_switches.any_active()
    }
}
