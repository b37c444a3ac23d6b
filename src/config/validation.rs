use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Rules applied to every submission before it reaches the store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Maximum message length in Unicode scalar values
    #[serde(default = "default_message_max_length")]
    pub message_max_length: usize,

    /// Accepted values for the optional `color` field
    #[serde(default = "default_allowed_colors")]
    pub allowed_colors: Vec<String>,

    /// Color assigned when a submission omits one
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            message_max_length: default_message_max_length(),
            allowed_colors: default_allowed_colors(),
            default_color: default_color(),
        }
    }
}

impl ValidationConfig {
    /// # Errors
    /// Returns `Error::InvalidConfig` when:
    /// - `message_max_length` is 0
    /// - the color set is empty or contains blank entries
    /// - `default_color` is not one of `allowed_colors`
    pub fn validate(&self) -> Result<()> {
        if self.message_max_length == 0 {
            return Err(Error::InvalidConfig("message_max_length must be at least 1".into()));
        }
        if self.allowed_colors.is_empty() {
            return Err(Error::InvalidConfig("allowed_colors cannot be empty".into()));
        }
        if self.allowed_colors.iter().any(|c| c.trim().is_empty()) {
            return Err(Error::InvalidConfig("allowed_colors cannot contain blank entries".into()));
        }
        if !self.is_allowed_color(&self.default_color) {
            return Err(Error::InvalidConfig(format!(
                "default_color {:?} is not one of allowed_colors {:?}",
                self.default_color, self.allowed_colors
            )));
        }
        Ok(())
    }

    pub fn is_allowed_color(
        &self,
        color: &str,
    ) -> bool {
        self.allowed_colors.iter().any(|c| c == color)
    }
}

fn default_message_max_length() -> usize {
    500
}

fn default_allowed_colors() -> Vec<String> {
    ["pink", "purple", "blue", "green", "yellow"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_color() -> String {
    "yellow".to_string()
}
