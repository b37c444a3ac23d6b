use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Live feed delivery and subscriber liveness settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    /// Interval between probe cycles in milliseconds.
    /// A subscriber silent for two consecutive cycles is evicted.
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,

    /// Pending outbound frames per subscriber before it counts as failed
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,

    /// Upper bound on a single socket write in milliseconds
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Maximum inbound WebSocket frame size in bytes
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            probe_interval_ms: default_probe_interval_ms(),
            outbox_capacity: default_outbox_capacity(),
            send_timeout_ms: default_send_timeout_ms(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.probe_interval_ms < 10 {
            return Err(Error::InvalidConfig(format!(
                "probe_interval_ms {} too small, minimum 10ms",
                self.probe_interval_ms
            )));
        }
        if self.outbox_capacity == 0 {
            return Err(Error::InvalidConfig("outbox_capacity must be at least 1".into()));
        }
        if self.send_timeout_ms == 0 {
            return Err(Error::InvalidConfig("send_timeout_ms must be greater than 0".into()));
        }
        if self.max_frame_bytes == 0 {
            return Err(Error::InvalidConfig("max_frame_bytes must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

fn default_probe_interval_ms() -> u64 {
    30_000
}

fn default_outbox_capacity() -> usize {
    256
}

fn default_send_timeout_ms() -> u64 {
    5_000
}

fn default_max_frame_bytes() -> usize {
    16 * 1024
}
