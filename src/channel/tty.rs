use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tokio_util::codec::Framed;
use tracing::{debug, info};

use super::config::SerialConfig;
use super::{ChannelError, SerialChannel};
use crate::protocol::{Command, ProtocolError, Reply, ZaberCodec};

/// RS-232 channel backed by a real serial port.
pub struct TtyChannel {
    framed: Framed<SerialStream, ZaberCodec>,
    read_timeout: Duration,
}

impl TtyChannel {
    pub fn open(config: &SerialConfig) -> Result<Self, ChannelError> {
        let stream = tokio_serial::new(&config.port, config.baud_rate)
            .open_native_async()
            .map_err(|e| {
                ChannelError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e))
            })?;
        info!(port = %config.port, baud = config.baud_rate, "Opened serial port");
        Ok(Self {
            framed: Framed::new(stream, ZaberCodec),
            read_timeout: config.read_timeout,
        })
    }
}

#[async_trait::async_trait]
impl SerialChannel for TtyChannel {
    async fn send(&mut self, command: &Command) -> Result<(), ChannelError> {
        self.framed.send(*command).await.map_err(ChannelError::from)
    }

    async fn recv(&mut self) -> Result<Reply, ChannelError> {
        match tokio::time::timeout(self.read_timeout, self.framed.next()).await {
            Err(_) => {
                debug!(timeout = ?self.read_timeout, "Frame read timed out");
                Err(ChannelError::ReadTimeout)
            }
            Ok(None) => Err(ChannelError::Closed),
            Ok(Some(Ok(reply))) => Ok(reply),
            Ok(Some(Err(ProtocolError::IoError(io)))) => Err(ChannelError::IoError(io)),
            Ok(Some(Err(err))) => Err(ChannelError::Garbled(err)),
        }
    }
}
