pub mod limit_switches;
pub mod state;
pub mod state_info;

pub use limit_switches::LimitSwitches;
pub use state::MotionState;
pub use state_info::AxisStateInfo;
