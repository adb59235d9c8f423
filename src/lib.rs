//! Driver for Zaber T-MM positioning stages speaking the 6-byte binary
//! protocol over RS-232.
//!
//! The line is half duplex with no sequence numbers, so the crate is
//! organized around getting request/reply correlation right:
//!
//! - [`protocol`] frames and parses the fixed-size binary packets.
//! - [`channel`] is the transport seam: a real `tokio-serial` port or a
//!   scriptable mock.
//! - [`correlator`] matches replies to outstanding commands with a
//!   bounded retry budget, discarding stale and unsolicited frames.
//! - [`registry`] tracks active axes and applies device-mode setup.
//! - [`controller`] is the motion facade a host framework talks to.

pub mod axis;
pub mod channel;
pub mod controller;
pub mod correlator;
pub mod protocol;
pub mod registry;
