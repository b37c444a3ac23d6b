use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Per-origin request limits.
///
/// Enforcement belongs to the pre-filter in front of the board; these values
/// are only carried so one configuration file can describe a deployment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Requests allowed per origin within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_ms == 0 || self.max_requests == 0 {
            return Err(Error::InvalidConfig(
                "rate_limit window_ms and max_requests must both be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn default_window_ms() -> u64 {
    15 * 60 * 1000
}

fn default_max_requests() -> u32 {
    100
}
