//! Configuration management for the note board.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support (`CONFIG_PATH`)
//! - Environment variable overrides (`BOARD__SECTION__FIELD`)
//! - Section-wise validation
mod feed;
mod logging;
mod monitoring;
mod rate_limit;
mod server;
mod store;
mod validation;
pub use feed::*;
pub use logging::*;
pub use monitoring::*;
pub use rate_limit::*;
pub use server::*;
pub use store::*;
pub use validation::*;

use std::env;
use std::fmt::Debug;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Environment variable prefix for overrides, e.g. `BOARD__STORE__MAX_NOTES`
pub(crate) const ENV_PREFIX: &str = "BOARD";

/// Main configuration container for all board components
///
/// Combines all section configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables (highest priority)
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct BoardConfig {
    /// HTTP listener and request limits
    #[serde(default)]
    pub server: ServerConfig,
    /// Note store capacity
    #[serde(default)]
    pub store: StoreConfig,
    /// Submission validation rules
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Live feed delivery and liveness probing
    #[serde(default)]
    pub feed: FeedConfig,
    /// Limits handed to the external rate-limiting pre-filter
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Metrics and monitoring settings
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Debug for BoardConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("BoardConfig")
            .field("server", &self.server)
            .field("store", &self.store)
            .field("feed", &self.feed)
            .finish()
    }
}

impl BoardConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Configuration sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from `CONFIG_PATH` environment variable (if set)
    /// 3. `PORT` environment variable, applied to `server.listen_address`
    /// 4. Environment variables with `BOARD__` prefix (highest priority)
    ///
    /// # Note
    /// This method does NOT validate the configuration. Callers MUST call `validate()`
    /// before using the configuration.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("CONFIG_PATH", "config/board.toml");
    /// std::env::set_var("BOARD__STORE__MAX_NOTES", "200");
    /// let cfg = BoardConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_port_shortcut()?;

        let config: Self = Config::builder()
            .add_source(Config::try_from(&config)?)
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        Ok(config) // No validation - deferred to validate()
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        Ok(config) // No validation - deferred to validate()
    }

    /// Validates configuration and returns validated instance.
    ///
    /// Consumes self and performs validation of all sections. Must be called
    /// after all configuration overrides to ensure the final config is valid.
    pub fn validate(self) -> Result<Self> {
        self.server.validate()?;
        self.store.validate()?;
        self.validation.validate()?;
        self.feed.validate()?;
        self.rate_limit.validate()?;
        self.monitoring.validate(self.server.listen_address.port())?;
        Ok(self)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("validation.allowed_colors")
    }

    /// `PORT` is the conventional single-variable way to move the listener.
    fn apply_port_shortcut(&mut self) -> Result<()> {
        if let Ok(port) = env::var("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("PORT {port:?} is not a valid port: {e}")))?;
            self.server.listen_address.set_port(port);
        }
        Ok(())
    }
}
