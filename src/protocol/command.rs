use super::error::ProtocolError;

/// One outbound instruction in the Zaber binary protocol.
///
/// Immutable once constructed. Address 0 broadcasts to every device on
/// the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub device_address: u8,
    pub command_number: u8,
    pub data: i32,
}

impl Command {
    pub fn new(device_address: u8, command_number: u8, data: i32) -> Self {
        Self {
            device_address,
            command_number,
            data,
        }
    }

    /// Command with an empty payload, for opcodes that take no argument.
    pub fn bare(device_address: u8, command_number: u8) -> Self {
        Self::new(device_address, command_number, 0)
    }

    /// Builds a command from wide integers coming off an untyped
    /// boundary, rejecting anything that does not fit the wire format.
    pub fn checked(
        device_address: i64,
        command_number: i64,
        data: i64,
    ) -> Result<Self, ProtocolError> {
        let device_address = u8::try_from(device_address)
            .map_err(|_| ProtocolError::DeviceAddressOutOfRange(device_address))?;
        let command_number = u8::try_from(command_number)
            .map_err(|_| ProtocolError::CommandNumberOutOfRange(command_number))?;
        let data = i32::try_from(data).map_err(|_| ProtocolError::DataOutOfRange(data))?;
        Ok(Self::new(device_address, command_number, data))
    }
}
