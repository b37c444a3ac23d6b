use std::convert::Infallible;
use std::sync::Arc;

use warp::ws::Ws;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

use super::handlers;
use super::ws;
use crate::BoardConfig;
use crate::BoardContext;
use crate::IngressApi;
use crate::RawSubmission;
use crate::SubscriptionEndpoint;

/// Per-connection settings handed to every WebSocket task
#[derive(Debug, Clone, Copy)]
pub(crate) struct FeedSettings {
    pub(crate) send_timeout: std::time::Duration,
    pub(crate) max_frame_bytes: usize,
}

/// All board routes, with rejections recovered into JSON error bodies.
pub fn routes(
    ctx: Arc<BoardContext>,
    config: &BoardConfig,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let ingress = IngressApi::new(ctx.clone());
    let endpoint = SubscriptionEndpoint::new(ctx);
    let settings = FeedSettings {
        send_timeout: config.feed.send_timeout(),
        max_frame_bytes: config.feed.max_frame_bytes,
    };

    let notes = warp::path!("api" / "sticky-notes");

    let list = notes
        .and(warp::get())
        .and(with_ingress(ingress.clone()))
        .and_then(handlers::list_notes);

    let submit = notes
        .and(warp::post())
        .and(submission_body(config.server.max_body_bytes))
        .and(with_ingress(ingress))
        .and_then(handlers::submit_note);

    let live = warp::path::end()
        .and(warp::ws())
        .and(warp::any().map(move || endpoint.clone()))
        .map(move |upgrade: Ws, endpoint: SubscriptionEndpoint| {
            upgrade
                .max_frame_size(settings.max_frame_bytes)
                .max_message_size(settings.max_frame_bytes)
                .on_upgrade(move |socket| ws::serve_subscriber(socket, endpoint, settings.send_timeout))
        });

    list.or(submit).or(live).recover(handlers::handle_rejection)
}

/// Reads the body under `limit` bytes whether or not it is chunked.
fn submission_body(limit: u64) -> impl Filter<Extract = (RawSubmission,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::stream())
        .and_then(move |declared, content_type, body| {
            handlers::read_submission(declared, content_type, body, limit)
        })
}

fn with_ingress(ingress: IngressApi) -> impl Filter<Extract = (IngressApi,), Error = Infallible> + Clone {
    warp::any().map(move || ingress.clone())
}
