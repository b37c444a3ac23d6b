use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Maximum number of notes kept in memory; the oldest is evicted beyond this
    #[serde(default = "default_max_notes")]
    pub max_notes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_notes: default_max_notes(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_notes == 0 {
            return Err(Error::InvalidConfig("max_notes must be at least 1".into()));
        }
        Ok(())
    }
}

fn default_max_notes() -> usize {
    1000
}
