use serde_json::json;
use serde_json::Value;
use warp::http::StatusCode;

use super::*;
use crate::test_utils::context_with;
use crate::BoardConfig;
use crate::Note;

fn board(config: BoardConfig) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone {
    let ctx = context_with(config.clone());
    routes(ctx, &config)
}

fn error_of(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body).unwrap().error
}

#[tokio::test]
async fn post_should_create_note_with_wire_field_names() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .json(&json!({
            "message": "gm",
            "signature": "5xYzSignature",
            "walletAddress": "Wa11et",
            "color": "pink",
            "onChain": true
        }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["message"], "gm");
    assert_eq!(body["signature"], "5xYzSignature");
    assert_eq!(body["walletAddress"], "Wa11et");
    assert_eq!(body["color"], "pink");
    assert!(body["id"].as_str().unwrap().starts_with("5xYzSign-"));
    assert!(body["timestamp"].is_string());
    assert!(body.get("onChain").is_none());
}

#[tokio::test]
async fn post_without_color_should_default_to_yellow() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .json(&json!({ "message": "gm", "signature": "s", "walletAddress": "w" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let note: Note = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(note.color(), "yellow");
}

#[tokio::test]
async fn validation_failures_should_be_bad_requests() {
    let filter = board(BoardConfig::default());

    let cases = [
        (json!({ "message": "gm", "walletAddress": "w" }), "Missing required fields"),
        (json!({ "message": 5, "signature": "s", "walletAddress": "w" }), "Invalid data types"),
        (
            json!({ "message": "x".repeat(501), "signature": "s", "walletAddress": "w" }),
            "Message too long",
        ),
        (
            json!({ "message": "gm", "signature": "s", "walletAddress": "w", "color": "teal" }),
            "Invalid color selection",
        ),
    ];

    for (body, expected) in cases {
        let res = warp::test::request()
            .method("POST")
            .path("/api/sticky-notes")
            .json(&body)
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error_of(res.body()), expected);
    }

    let res = warp::test::request()
        .method("GET")
        .path("/api/sticky-notes")
        .reply(&filter)
        .await;
    assert_eq!(&res.body()[..], b"[]");
}

#[tokio::test]
async fn malformed_json_should_be_rejected() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_of(res.body()), "Invalid request body");
}

#[tokio::test]
async fn oversized_body_should_be_rejected() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .json(&json!({ "message": "x".repeat(20 * 1024), "signature": "s", "walletAddress": "w" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_of(res.body()), "Request body too large");
}

#[tokio::test]
async fn get_should_list_notes_oldest_first() {
    let mut config = BoardConfig::default();
    config.store.max_notes = 2;
    let filter = board(config);

    for message in ["A", "B", "C"] {
        let res = warp::test::request()
            .method("POST")
            .path("/api/sticky-notes")
            .json(&json!({ "message": message, "signature": "s", "walletAddress": "w" }))
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = warp::test::request()
        .method("GET")
        .path("/api/sticky-notes")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let notes: Vec<Note> = serde_json::from_slice(res.body()).unwrap();
    let messages: Vec<&str> = notes.iter().map(|n| n.message()).collect();
    assert_eq!(messages, vec!["B", "C"]);
}

#[tokio::test]
async fn unknown_path_should_be_not_found() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("GET")
        .path("/api/unknown")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_of(res.body()), "Not found");
}

#[tokio::test]
async fn wrong_method_should_be_rejected() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("DELETE")
        .path("/api/sticky-notes")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn plain_get_on_feed_path_should_ask_for_upgrade() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("GET")
        .path("/")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_of(res.body()), "Expected a WebSocket upgrade");
}

fn chunks(parts: &[&'static str]) -> impl futures::Stream<Item = Result<warp::hyper::body::Bytes, warp::Error>> {
    futures::stream::iter(
        parts
            .iter()
            .map(|p| Ok(warp::hyper::body::Bytes::from_static(p.as_bytes())))
            .collect::<Vec<_>>(),
    )
}

#[tokio::test]
async fn chunked_body_within_limit_should_be_decoded() {
    let body = chunks(&[r#"{"message":"gm","#, r#""signature":"s","#, r#""walletAddress":"w"}"#]);

    let raw = handlers::read_submission(None, None, body, 1024).await.unwrap();

    assert_eq!(raw, crate::RawSubmission::new("gm", "s", "w"));
}

#[tokio::test]
async fn chunked_body_over_limit_should_be_too_large() {
    let body = chunks(&[r#"{"message":""#, "xxxxxxxxxxxxxxxxxxxx", r#""}"#]);

    let err = handlers::read_submission(None, None, body, 16).await.unwrap_err();

    assert!(err.find::<handlers::BodyTooLarge>().is_some());
}

#[tokio::test]
async fn declared_length_over_limit_should_be_refused_before_reading() {
    let err = handlers::read_submission(Some(17), None, chunks(&[]), 16).await.unwrap_err();

    assert!(err.find::<handlers::BodyTooLarge>().is_some());
}

#[tokio::test]
async fn non_json_content_type_should_fail_as_missing_fields() {
    let filter = board(BoardConfig::default());

    let res = warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .header("content-type", "text/plain")
        .body(r#"{"message":"gm","signature":"s","walletAddress":"w"}"#)
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_of(res.body()), "Missing required fields");
}
