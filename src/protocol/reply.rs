use super::command::Command;

/// One inbound frame, produced only by decoding a full 6-byte read.
///
/// The payload meaning depends on the opcode that was echoed back:
/// a position for opcode 60, a status code for opcode 54, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub device_address: u8,
    pub command_number: u8,
    pub data: i32,
}

impl Reply {
    /// Whether this frame answers `command`. The protocol has no
    /// sequence numbers, so (device address, command number) is the
    /// only correlation key available.
    pub fn answers(&self, command: &Command) -> bool {
        self.device_address == command.device_address
            && self.command_number == command.command_number
    }
}
