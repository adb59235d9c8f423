#[derive(Debug)]
pub enum ProtocolError {
    DeviceAddressOutOfRange(i64),
    CommandNumberOutOfRange(i64),
    DataOutOfRange(i64),
    ShortFrame { expected: usize, got: usize },
    IoError(std::io::Error),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::DeviceAddressOutOfRange(v) => {
                write!(f, "Device address out of range (0-255): {}", v)
            }
            ProtocolError::CommandNumberOutOfRange(v) => {
                write!(f, "Command number out of range (0-255): {}", v)
            }
            ProtocolError::DataOutOfRange(v) => {
                write!(f, "Data out of signed 32-bit range: {}", v)
            }
            ProtocolError::ShortFrame { expected, got } => {
                write!(f, "Short frame: expected {} bytes, got {}", expected, got)
            }
            ProtocolError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<std::io::Error> for ProtocolError {
    fn from(err: std::io::Error) -> Self {
        ProtocolError::IoError(err)
    }
}
