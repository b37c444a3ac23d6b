use tokio::task::JoinHandle;
use tracing::error;
use tracing::info;

use crate::Result;

/// Spawns a named background task whose failure is logged rather than lost.
pub(crate) fn spawn_task<F, Fut>(
    name: &str,
    task_fn: F,
) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send + 'static,
{
    // Clone the name so it can be safely moved into the async block
    let name = name.to_string();
    tokio::spawn(async move {
        match task_fn().await {
            Ok(()) => info!("background task {name} exited"),
            Err(e) => error!("background task {name} stopped with error: {:?}", e),
        }
    })
}
