/// Motion state of one axis, derived from the latest status reply.
/// Never persisted; every status query recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    Idle,
    Moving,
    Fault,
    /// No status reply seen yet.
    #[default]
    Unknown,
}

impl MotionState {
    /// Maps the status opcode's payload: 0 is idle, 1 through 23 are
    /// movement phases, anything else is a fault.
    pub fn from_status(data: i32) -> Self {
        match data {
            0 => MotionState::Idle,
            1..=23 => MotionState::Moving,
            _ => MotionState::Fault,
        }
    }
}
