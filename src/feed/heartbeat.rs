use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::interval;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;

use super::SubscriptionRegistry;

/// Drives [`SubscriptionRegistry::probe_cycle`] every `period` until the
/// shutdown signal fires or its sender is dropped.
///
/// The first cycle runs one full `period` after start, so a subscriber
/// that never answers is evicted on the second cycle after it registered.
pub async fn run_probe_timer(
    registry: Arc<SubscriptionRegistry>,
    period: Duration,
    mut shutdown_signal: watch::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await; // Skip the immediate first tick

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = registry.probe_cycle();
                if report.evicted > 0 || report.probed > 0 {
                    debug!("probe cycle: probed={}, evicted={}", report.probed, report.evicted);
                }
            }
            _ = shutdown_signal.changed() => {
                info!("probe timer stopped");
                break;
            }
        }
    }
}
