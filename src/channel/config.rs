use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Serial port path, e.g. "/dev/ttyZaber" or "COM3".
    pub port: String,
    pub baud_rate: u32,
    /// How long one frame read may block before the correlator gets a
    /// chance to re-send.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyZaber".to_string(),
            baud_rate: 9600,
            read_timeout: Duration::from_secs(5),
        }
    }
}
