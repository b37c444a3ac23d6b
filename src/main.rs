use stickyboard::utils::file_io::open_file_for_append;
use stickyboard::BoardConfig;
use stickyboard::Error;
use stickyboard::LoggingConfig;
use stickyboard::Result;
use stickyboard::ServerBuilder;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "stickyboard.log";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let settings = BoardConfig::new()?.validate()?;

    // Initializing Logs
    let _guard = init_observability(&settings.logging)?;

    // Initializing Shutdown Signal
    let (graceful_tx, graceful_rx) = watch::channel(());

    let server = ServerBuilder::init(settings, graceful_rx.clone())
        .build()
        .start_probe_timer()
        .start_metrics_server(graceful_rx.clone())
        .ready()?;

    info!("Application started. Waiting for CTRL+C signal...");
    tokio::spawn(async {
        if let Err(e) = graceful_shutdown(graceful_tx).await {
            error!("Failed to shutdown: {:?}", e);
        }
    });

    if let Err(e) = server.run().await {
        error!("board stops: {:?}", e);
        return Err(e);
    }

    info!("Exiting program.");
    Ok(())
}

async fn graceful_shutdown(graceful_tx: watch::Sender<()>) -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C detected.");
        },
    }

    graceful_tx.send(()).map_err(|e| {
        error!("Failed to send shutdown signal: {}", e);
        Error::SignalSenderClosed(format!("Failed to send shutdown signal: {}", e))
    })?;

    info!("Shutdown signal sent");
    Ok(())
}

/// Logs go to `log_dir/stickyboard.log` when a directory is configured and to
/// stdout otherwise. `RUST_LOG` controls the filter, defaulting to `info`.
fn init_observability(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let (writer, guard) = match &logging.log_dir {
        Some(dir) => tracing_appender::non_blocking(open_file_for_append(&dir.join(LOG_FILE_NAME))?),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(guard)
}
