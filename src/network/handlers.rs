use std::convert::Infallible;

use futures::Stream;
use futures::StreamExt;
use serde::Deserialize;
use serde::Serialize;
use tracing::error;
use warp::http::StatusCode;
use warp::hyper::body::Buf;
use warp::reply;
use warp::Rejection;
use warp::Reply;

use crate::IngressApi;
use crate::RawSubmission;

/// Body of every non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    fn reply(
        message: impl Into<String>,
        status: StatusCode,
    ) -> reply::WithStatus<reply::Json> {
        reply::with_status(reply::json(&ErrorBody { error: message.into() }), status)
    }
}

/// Body exceeded `server.max_body_bytes`
#[derive(Debug)]
pub(super) struct BodyTooLarge;
impl warp::reject::Reject for BodyTooLarge {}

/// Body was not a JSON object, or could not be read
#[derive(Debug)]
pub(super) struct InvalidBody;
impl warp::reject::Reject for InvalidBody {}

/// Collects at most `limit` bytes and decodes them as a submission.
///
/// A declared `Content-Length` over the limit is refused before reading.
/// A non-JSON content type yields an empty submission, so it fails
/// validation as missing fields.
pub(super) async fn read_submission<S, B>(
    declared: Option<u64>,
    content_type: Option<String>,
    body: S,
    limit: u64,
) -> Result<RawSubmission, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    if declared.is_some_and(|len| len > limit) {
        return Err(warp::reject::custom(BodyTooLarge));
    }

    let mut buffer = Vec::new();
    futures::pin_mut!(body);
    while let Some(chunk) = body.next().await {
        let mut chunk = chunk.map_err(|_| warp::reject::custom(InvalidBody))?;
        if buffer.len() as u64 + chunk.remaining() as u64 > limit {
            return Err(warp::reject::custom(BodyTooLarge));
        }
        while chunk.has_remaining() {
            let bytes = chunk.chunk();
            let n = bytes.len();
            buffer.extend_from_slice(bytes);
            chunk.advance(n);
        }
    }

    let is_json = content_type.map_or(true, |ct| ct.to_ascii_lowercase().contains("json"));
    if !is_json {
        return Ok(RawSubmission::default());
    }
    serde_json::from_slice(&buffer).map_err(|_| warp::reject::custom(InvalidBody))
}

pub(super) async fn list_notes(ingress: IngressApi) -> Result<impl Reply, Infallible> {
    Ok(reply::json(&ingress.list_all()))
}

pub(super) async fn submit_note(
    raw: RawSubmission,
    ingress: IngressApi,
) -> Result<impl Reply, Infallible> {
    Ok(match ingress.submit(&raw) {
        Ok(note) => reply::with_status(reply::json(&note), StatusCode::CREATED),
        Err(reason) => ErrorBody::reply(reason.to_string(), StatusCode::BAD_REQUEST),
    })
}

/// Maps warp rejections to JSON error replies. Anything unrecognized is a
/// generic `500`; a request rejected here never reached the store.
pub(super) async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<BodyTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<InvalidBody>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request body")
    } else if err.find::<warp::reject::MissingHeader>().is_some()
        || err.find::<warp::reject::InvalidHeader>().is_some()
    {
        (StatusCode::BAD_REQUEST, "Expected a WebSocket upgrade")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!("unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(ErrorBody::reply(message, status))
}
