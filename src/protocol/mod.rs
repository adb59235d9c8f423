pub mod codec;
pub mod command;
pub mod error;
pub mod reply;

pub use codec::ZaberCodec;
pub use command::Command;
pub use error::ProtocolError;
pub use reply::Reply;

/// Every frame in the Zaber binary protocol is exactly this long, in
/// both directions.
pub const FRAME_LEN: usize = 6;

/// Command numbers understood by the T-MM family.
pub mod opcode {
    pub const HOME: u8 = 1;
    pub const MOVE_ABSOLUTE: u8 = 20;
    pub const STOP: u8 = 23;
    pub const SET_DEVICE_MODE: u8 = 40;
    pub const QUERY_STATUS: u8 = 54;
    pub const QUERY_POSITION: u8 = 60;
}

/// Device-mode payload applied on registration: bit 0 disables
/// auto-reply, bit 1 enables backlash correction. The setting is
/// non-volatile on the device.
pub const DEVICE_MODE_FLAGS: i32 = 3;

/// Encodes a command into its wire frame:
/// `[device_address][command_number][data, little-endian]`.
pub fn encode(command: &Command) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = command.device_address;
    frame[1] = command.command_number;
    frame[2..].copy_from_slice(&command.data.to_le_bytes());
    frame
}

/// Decodes one reply frame. The caller must already hold a full frame;
/// anything shorter is a `ShortFrame` error.
pub fn decode(bytes: &[u8]) -> Result<Reply, ProtocolError> {
    if bytes.len() < FRAME_LEN {
        return Err(ProtocolError::ShortFrame {
            expected: FRAME_LEN,
            got: bytes.len(),
        });
    }
    let mut data = [0u8; 4];
    data.copy_from_slice(&bytes[2..FRAME_LEN]);
    Ok(Reply {
        device_address: bytes[0],
        command_number: bytes[1],
        data: i32::from_le_bytes(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let frame = encode(&Command::new(1, opcode::MOVE_ABSOLUTE, 1000));
        assert_eq!(frame, [1, 20, 0xE8, 0x03, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_negative_data() {
        let frame = encode(&Command::new(2, opcode::MOVE_ABSOLUTE, -1));
        assert_eq!(frame, [2, 20, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_round_trip() {
        for command in [
            Command::new(0, 0, 0),
            Command::new(255, 255, i32::MAX),
            Command::new(1, opcode::QUERY_POSITION, i32::MIN),
            Command::new(2, opcode::SET_DEVICE_MODE, DEVICE_MODE_FLAGS),
        ] {
            let reply = decode(&encode(&command)).unwrap();
            assert_eq!(reply.device_address, command.device_address);
            assert_eq!(reply.command_number, command.command_number);
            assert_eq!(reply.data, command.data);
        }
    }

    #[test]
    fn test_decode_short_frame() {
        let err = decode(&[1, 54, 0]).unwrap_err();
        match err {
            ProtocolError::ShortFrame { expected, got } => {
                assert_eq!(expected, FRAME_LEN);
                assert_eq!(got, 3);
            }
            other => panic!("Expected ShortFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_checked_construction() {
        assert!(Command::checked(1, 54, 0).is_ok());
        assert!(matches!(
            Command::checked(256, 54, 0),
            Err(ProtocolError::DeviceAddressOutOfRange(256))
        ));
        assert!(matches!(
            Command::checked(1, -1, 0),
            Err(ProtocolError::CommandNumberOutOfRange(-1))
        ));
        assert!(matches!(
            Command::checked(1, 20, i64::from(i32::MAX) + 1),
            Err(ProtocolError::DataOutOfRange(_))
        ));
    }

    #[test]
    fn test_reply_answers() {
        let command = Command::bare(1, opcode::QUERY_STATUS);
        let reply = decode(&encode(&command)).unwrap();
        assert!(reply.answers(&command));
        assert!(!reply.answers(&Command::bare(2, opcode::QUERY_STATUS)));
        assert!(!reply.answers(&Command::bare(1, opcode::QUERY_POSITION)));
    }
}
