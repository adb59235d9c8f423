pub mod config;
pub mod mock;
pub mod tty;

use crate::protocol::{Command, ProtocolError, Reply};

/// The serial line to the stage: half duplex, one frame at a time.
///
/// Implementations own the transport exclusively. There is no internal
/// locking; callers must serialize access themselves.
#[async_trait::async_trait]
pub trait SerialChannel: Send {
    /// Writes one command frame. Returns once the frame has been handed
    /// to the transport, not when the device has acted on it.
    async fn send(&mut self, command: &Command) -> Result<(), ChannelError>;

    /// Reads one reply frame, waiting up to the channel's configured
    /// read timeout.
    async fn recv(&mut self) -> Result<Reply, ChannelError>;
}

#[derive(Debug)]
pub enum ChannelError {
    /// No complete frame arrived within the read timeout.
    ReadTimeout,
    /// A frame arrived but could not be decoded.
    Garbled(ProtocolError),
    /// The transport closed underneath us.
    Closed,
    IoError(std::io::Error),
}

impl ChannelError {
    /// Whether a retry can reasonably be expected to help. Transport
    /// failures are not retried here; re-opening the port is the
    /// owner's responsibility.
    pub fn is_transient(&self) -> bool {
        matches!(self, ChannelError::ReadTimeout | ChannelError::Garbled(_))
    }
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelError::ReadTimeout => write!(f, "Read timed out before a full frame arrived"),
            ChannelError::Garbled(err) => write!(f, "Garbled frame: {}", err),
            ChannelError::Closed => write!(f, "Serial transport closed"),
            ChannelError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ChannelError {}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::IoError(err)
    }
}

impl From<ProtocolError> for ChannelError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::IoError(io) => ChannelError::IoError(io),
            other => ChannelError::Garbled(other),
        }
    }
}
