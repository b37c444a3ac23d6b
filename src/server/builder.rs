//! A builder for assembling and launching a [`BoardServer`].
//!
//! ## Lifecycle
//! - `build()`: creates the shared [`BoardContext`] unless one was supplied
//! - `start_probe_timer()` / `start_metrics_server()`: spawn background tasks
//! - `ready()`: finalizes construction and returns the [`BoardServer`]
//!
//! ## Example
//! ```ignore
//! let (shutdown_tx, shutdown_rx) = watch::channel(());
//! let server = ServerBuilder::init(config, shutdown_rx)
//!     .build()
//!     .start_probe_timer()
//!     .start_metrics_server(shutdown_tx.subscribe())
//!     .ready()?;
//! server.run().await?;
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::BoardServer;
use crate::metrics;
use crate::run_probe_timer;
use crate::utils::async_task::spawn_task;
use crate::BoardConfig;
use crate::BoardContext;
use crate::Error;
use crate::Result;

pub struct ServerBuilder {
    config: BoardConfig,
    context: Option<Arc<BoardContext>>,
    shutdown_signal: watch::Receiver<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl ServerBuilder {
    /// Loads configuration from defaults, `CONFIG_PATH` and the environment,
    /// applies `config_path` on top when given, then validates.
    pub fn new(
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<()>,
    ) -> Result<Self> {
        let mut config = BoardConfig::new()?;
        if let Some(p) = config_path {
            info!("with_override_config from: {}", p);
            config = config.with_override_config(p)?;
        }
        Ok(Self::init(config.validate()?, shutdown_signal))
    }

    /// Core initialization shared by all construction paths
    pub fn init(
        config: BoardConfig,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        Self {
            config,
            context: None,
            shutdown_signal,
            tasks: Vec::new(),
        }
    }

    /// Uses an existing context instead of creating one in `build()`
    pub fn context(
        mut self,
        context: Arc<BoardContext>,
    ) -> Self {
        self.context = Some(context);
        self
    }

    /// Replaces the entire configuration
    pub fn config(
        mut self,
        config: BoardConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn build(mut self) -> Self {
        if self.context.is_none() {
            debug!("building board context: {:?}", self.config);
            self.context = Some(Arc::new(BoardContext::new(&self.config)));
        }
        self
    }

    /// Spawns the periodic liveness probe over the live set.
    /// Must be called after `build()`.
    pub fn start_probe_timer(mut self) -> Self {
        let Some(ctx) = self.context.clone() else {
            warn!("start_probe_timer called before build(); probe timer not started");
            return self;
        };
        let period = self.config.feed.probe_interval();
        let shutdown = self.shutdown_signal.clone();
        let handle = spawn_task("probe_timer", move || async move {
            run_probe_timer(ctx.registry().clone(), period, shutdown).await;
            Ok(())
        });
        self.tasks.push(handle);
        self
    }

    /// Launches the Prometheus endpoint when monitoring is enabled.
    pub fn start_metrics_server(
        mut self,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        let Some(port) = self.config.monitoring.metrics_port() else {
            debug!("monitoring disabled; metrics server not started");
            return self;
        };
        let handle = spawn_task("metrics_server", move || async move {
            metrics::start_server(port, shutdown_signal).await;
            Ok(())
        });
        self.tasks.push(handle);
        self
    }

    /// # Errors
    /// Returns `Error::Fatal` if `build()` was never called.
    pub fn ready(self) -> Result<BoardServer> {
        let context = self
            .context
            .ok_or_else(|| Error::Fatal("server must be built before ready()".to_string()))?;
        Ok(BoardServer::new(
            context,
            self.config,
            self.shutdown_signal,
            self.tasks,
        ))
    }
}
