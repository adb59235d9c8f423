use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use super::command::Command;
use super::error::ProtocolError;
use super::reply::Reply;
use super::FRAME_LEN;

/// Frames the binary protocol over a byte stream, for use with
/// `tokio_util::codec::Framed`. Delegates to the pure
/// [`encode`](super::encode)/[`decode`](super::decode) functions.
pub struct ZaberCodec;

impl Decoder for ZaberCodec {
    type Item = Reply;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Reply>, ProtocolError> {
        if src.len() < FRAME_LEN {
            return Ok(None);
        }
        let frame = src.split_to(FRAME_LEN);
        super::decode(&frame).map(Some)
    }
}

impl Encoder<Command> for ZaberCodec {
    type Error = ProtocolError;

    fn encode(&mut self, command: Command, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        dst.reserve(FRAME_LEN);
        dst.put_slice(&super::encode(&command));
        Ok(())
    }
}
