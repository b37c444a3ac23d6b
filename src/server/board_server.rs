use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::network::routes;
use crate::BoardConfig;
use crate::BoardContext;
use crate::Error;
use crate::Result;

/// A fully assembled board, ready to accept connections.
pub struct BoardServer {
    context: Arc<BoardContext>,
    config: BoardConfig,
    shutdown_signal: watch::Receiver<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl BoardServer {
    pub(super) fn new(
        context: Arc<BoardContext>,
        config: BoardConfig,
        shutdown_signal: watch::Receiver<()>,
        tasks: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            context,
            config,
            shutdown_signal,
            tasks,
        }
    }

    pub fn context(&self) -> &Arc<BoardContext> {
        &self.context
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Binds the listener and returns the bound address together with the
    /// serving future. On shutdown every live subscriber is deregistered
    /// before the listener stops.
    pub fn bind(&self) -> Result<(SocketAddr, impl Future<Output = ()> + Send + 'static)> {
        let address = self.config.server.listen_address;
        let routes = routes(self.context.clone(), &self.config);
        let mut shutdown = self.shutdown_signal.clone();
        let context = self.context.clone();

        warp::serve(routes)
            .try_bind_with_graceful_shutdown(address, async move {
                let _ = shutdown.changed().await;
                let drained = context.registry().shutdown();
                info!("shutdown: closed {} live subscribers", drained);
            })
            .map_err(|source| Error::Bind { address, source })
    }

    /// Serves until the shutdown signal fires, then waits for background
    /// tasks to stop.
    pub async fn run(self) -> Result<()> {
        let (addr, server) = self.bind()?;
        info!("board listening on {}", addr);
        server.await;

        for task in self.tasks {
            if let Err(e) = task.await {
                return Err(Error::Fatal(format!("background task failed: {e}")));
            }
        }
        info!("board stopped");
        Ok(())
    }
}
