use std::time::Duration;

use tracing::{debug, warn};

use crate::channel::{ChannelError, SerialChannel};
use crate::protocol::{Command, Reply};

/// Retry budget for one exchange: how many times the command is
/// re-sent, and how long to wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct ExchangePolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl ExchangePolicy {
    pub const fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }
}

#[derive(Debug)]
pub enum CorrelationError {
    /// Attempt budget exhausted without a matching reply. Carries the
    /// last mismatched reply seen, if any frame decoded at all, so
    /// callers can choose an explicit stale fallback.
    Unresponsive {
        attempts: u32,
        last_reply: Option<Reply>,
    },
    Channel(ChannelError),
}

impl std::fmt::Display for CorrelationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationError::Unresponsive { attempts, .. } => {
                write!(f, "No matching reply after {} attempts", attempts)
            }
            CorrelationError::Channel(err) => write!(f, "Channel error: {}", err),
        }
    }
}

impl std::error::Error for CorrelationError {}

impl From<ChannelError> for CorrelationError {
    fn from(err: ChannelError) -> Self {
        CorrelationError::Channel(err)
    }
}

/// Sends a command and finds the reply that answers it on a shared
/// half-duplex line that may deliver stale, unsolicited, or garbled
/// frames.
///
/// The protocol has no sequence numbers; the only correlation key is
/// (device address, command number). Keeping at most one command
/// outstanding per axis is an operating discipline the caller must
/// uphold, not something enforced here.
pub struct ReplyCorrelator<C> {
    channel: C,
}

impl<C: SerialChannel> ReplyCorrelator<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Fire-and-forget write. The device will act (or not) without
    /// telling us; completion has to be observed via a status query.
    pub async fn post(&mut self, command: &Command) -> Result<(), CorrelationError> {
        self.channel.send(command).await?;
        Ok(())
    }

    /// Sends `command` and reads until a frame answers it. Mismatched
    /// frames (unsolicited pushes, late replies to earlier commands)
    /// are discarded and the command is re-sent after `retry_delay`,
    /// up to `max_attempts` times.
    pub async fn exchange(
        &mut self,
        command: &Command,
        policy: ExchangePolicy,
    ) -> Result<Reply, CorrelationError> {
        let mut last_reply = None;
        for attempt in 1..=policy.max_attempts {
            self.channel.send(command).await?;
            match self.channel.recv().await {
                Ok(reply) if reply.answers(command) => return Ok(reply),
                Ok(reply) => {
                    debug!(
                        device = reply.device_address,
                        opcode = reply.command_number,
                        attempt,
                        "Discarding mismatched frame"
                    );
                    last_reply = Some(reply);
                }
                Err(err) if err.is_transient() => {
                    debug!(error = %err, attempt, "Frame read failed, re-sending");
                }
                Err(err) => return Err(CorrelationError::Channel(err)),
            }
            if attempt < policy.max_attempts {
                tokio::time::sleep(policy.retry_delay).await;
            }
        }
        warn!(
            device = command.device_address,
            opcode = command.command_number,
            attempts = policy.max_attempts,
            "Device unresponsive or line desynchronized"
        );
        Err(CorrelationError::Unresponsive {
            attempts: policy.max_attempts,
            last_reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::mock::MockChannel;
    use crate::protocol::opcode;

    const FAST: ExchangePolicy = ExchangePolicy::new(5, Duration::from_millis(1));

    #[tokio::test]
    async fn test_exchange_skips_mismatched_frames() {
        let mut channel = MockChannel::new();
        // Two stale frames before the answer: wrong device, then an
        // unsolicited push with the wrong opcode.
        channel.queue_frame(2, opcode::QUERY_POSITION, 7);
        channel.queue_frame(1, opcode::QUERY_STATUS, 4);
        channel.queue_frame(1, opcode::QUERY_POSITION, 1234);

        let mut correlator = ReplyCorrelator::new(channel);
        let command = Command::bare(1, opcode::QUERY_POSITION);
        let reply = correlator.exchange(&command, FAST).await.unwrap();

        assert_eq!(reply.data, 1234);
        // One write per attempt.
        assert_eq!(correlator.channel().sent().len(), 3);
        assert!(correlator.channel().sent().iter().all(|c| *c == command));
    }

    #[tokio::test]
    async fn test_exchange_retries_through_read_timeouts() {
        let mut channel = MockChannel::new();
        channel.queue_error(ChannelError::ReadTimeout);
        channel.queue_error(ChannelError::ReadTimeout);
        channel.queue_frame(1, opcode::QUERY_STATUS, 0);

        let mut correlator = ReplyCorrelator::new(channel);
        let command = Command::bare(1, opcode::QUERY_STATUS);
        let reply = correlator.exchange(&command, FAST).await.unwrap();
        assert_eq!(reply.data, 0);
    }

    #[tokio::test]
    async fn test_exchange_exhausts_attempt_budget() {
        let mut channel = MockChannel::new();
        for _ in 0..5 {
            channel.queue_frame(2, opcode::QUERY_POSITION, 99);
        }

        let mut correlator = ReplyCorrelator::new(channel);
        let command = Command::bare(1, opcode::QUERY_POSITION);
        let err = correlator.exchange(&command, FAST).await.unwrap_err();

        match err {
            CorrelationError::Unresponsive {
                attempts,
                last_reply,
            } => {
                assert_eq!(attempts, 5);
                let last = last_reply.expect("last mismatched reply retained");
                assert_eq!(last.device_address, 2);
                assert_eq!(last.data, 99);
            }
            other => panic!("Expected Unresponsive, got {:?}", other),
        }
        assert_eq!(correlator.channel().sent().len(), 5);
    }

    #[tokio::test]
    async fn test_exchange_with_silent_device_has_no_last_reply() {
        let correlator = &mut ReplyCorrelator::new(MockChannel::new());
        let command = Command::bare(1, opcode::QUERY_STATUS);
        match correlator.exchange(&command, FAST).await.unwrap_err() {
            CorrelationError::Unresponsive { last_reply, .. } => assert!(last_reply.is_none()),
            other => panic!("Expected Unresponsive, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_immediately() {
        let mut channel = MockChannel::new();
        channel.queue_error(ChannelError::Closed);

        let mut correlator = ReplyCorrelator::new(channel);
        let command = Command::bare(1, opcode::QUERY_STATUS);
        match correlator.exchange(&command, FAST).await.unwrap_err() {
            CorrelationError::Channel(ChannelError::Closed) => {}
            other => panic!("Expected Channel(Closed), got {:?}", other),
        }
        assert_eq!(correlator.channel().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_post_writes_without_reading() {
        let mut correlator = ReplyCorrelator::new(MockChannel::new());
        let command = Command::new(1, opcode::MOVE_ABSOLUTE, 1000);
        correlator.post(&command).await.unwrap();
        assert_eq!(correlator.channel().sent(), &[command]);
    }
}
