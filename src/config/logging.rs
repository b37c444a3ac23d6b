use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for `stickyboard.log`; logs go to stdout when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Emit JSON lines instead of the human readable format
    #[serde(default)]
    pub json: bool,
}
