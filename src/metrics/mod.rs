use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::exponential_buckets;
use prometheus::Histogram;
use prometheus::HistogramOpts;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

lazy_static! {
    pub static ref NOTES_ACCEPTED: IntCounter =
        IntCounter::new("notes_accepted_total", "Notes accepted and stored")
            .expect("metric can not be created");

    pub static ref NOTES_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("notes_rejected_total", "Submissions rejected by validation"),
        &["reason"]
    )
    .expect("metric can not be created");

    pub static ref NOTES_EVICTED: IntCounter =
        IntCounter::new("notes_evicted_total", "Notes dropped from the full store")
            .expect("metric can not be created");

    pub static ref FEED_SUBSCRIBERS: IntGauge =
        IntGauge::new("feed_subscribers", "Currently registered live subscribers")
            .expect("metric can not be created");

    pub static ref FEED_EVICTIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("feed_evictions_total", "Subscribers removed from the live set"),
        &["cause"]
    )
    .expect("metric can not be created");

    pub static ref BROADCAST_FANOUT: Histogram = Histogram::with_opts(
        HistogramOpts::new("feed_broadcast_fanout", "Subscribers reached per broadcast note")
            .buckets(exponential_buckets(1.0, 2.0, 12).unwrap())
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

static REGISTER_ONCE: Once = Once::new();

fn register_custom_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(NOTES_ACCEPTED.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(NOTES_REJECTED.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(NOTES_EVICTED.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(FEED_SUBSCRIBERS.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(FEED_EVICTIONS.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(BROADCAST_FANOUT.clone()))
            .expect("collector can be registered");
    });
}

/// Serves `GET /metrics` until the shutdown signal fires.
pub async fn start_server(
    port: u16,
    mut shutdown_signal: watch::Receiver<()>,
) {
    let metrics_route = metrics_filter();

    match warp::serve(metrics_route).try_bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
        let _ = shutdown_signal.changed().await;
    }) {
        Ok((addr, server)) => {
            info!("metrics server listening on {}", addr);
            server.await;
        }
        Err(e) => error!("metrics server failed to bind port {}: {}", port, e),
    }
}

pub(crate) fn metrics_filter() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    register_custom_metrics();
    warp::path!("metrics").and(warp::get()).and_then(metrics_handler)
}

async fn metrics_handler() -> Result<impl Reply, Rejection> {
    Ok(gather_text())
}

/// Text exposition of every registered board metric
pub fn gather_text() -> String {
    use prometheus::Encoder;
    register_custom_metrics();
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        error!("could not encode custom metrics: {}", e);
    };
    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            error!("custom metrics could not be from_utf8'd: {}", e);
            String::default()
        }
    }
}
