use std::collections::VecDeque;

use super::{ChannelError, SerialChannel};
use crate::protocol::{Command, Reply};

/// Scriptable in-memory channel for tests and bench rigs. Replies are
/// served in the order they were queued; an empty queue behaves like a
/// read timeout. Every sent command is logged.
#[derive(Default)]
pub struct MockChannel {
    replies: VecDeque<Result<Reply, ChannelError>>,
    sent: Vec<Command>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_reply(&mut self, reply: Reply) {
        self.replies.push_back(Ok(reply));
    }

    pub fn queue_error(&mut self, err: ChannelError) {
        self.replies.push_back(Err(err));
    }

    /// Queues a reply frame as the device would send it.
    pub fn queue_frame(&mut self, device_address: u8, command_number: u8, data: i32) {
        self.queue_reply(Reply {
            device_address,
            command_number,
            data,
        });
    }

    pub fn sent(&self) -> &[Command] {
        &self.sent
    }
}

#[async_trait::async_trait]
impl SerialChannel for MockChannel {
    async fn send(&mut self, command: &Command) -> Result<(), ChannelError> {
        self.sent.push(*command);
        Ok(())
    }

    async fn recv(&mut self) -> Result<Reply, ChannelError> {
        self.replies
            .pop_front()
            .unwrap_or(Err(ChannelError::ReadTimeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::opcode;

    #[tokio::test]
    async fn test_replies_served_in_order() {
        let mut channel = MockChannel::new();
        channel.queue_frame(1, opcode::QUERY_STATUS, 0);
        channel.queue_frame(1, opcode::QUERY_POSITION, 500);

        let first = channel.recv().await.unwrap();
        assert_eq!(first.command_number, opcode::QUERY_STATUS);
        let second = channel.recv().await.unwrap();
        assert_eq!(second.data, 500);

        match channel.recv().await {
            Err(ChannelError::ReadTimeout) => {}
            other => panic!("Expected ReadTimeout, got {:?}", other),
        }
    }
}
