#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use serde_json::Value;
use stickyboard::network::routes;
use stickyboard::BoardConfig;
use stickyboard::BoardContext;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use warp::test::RequestBuilder;
use warp::ws::Message;
use warp::Filter;
use warp::Reply;

pub fn board(
    config: BoardConfig,
) -> (
    Arc<BoardContext>,
    impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone,
) {
    let ctx = Arc::new(BoardContext::new(&config));
    let filter = routes(ctx.clone(), &config);
    (ctx, filter)
}

pub fn post_note(message: &str) -> RequestBuilder {
    warp::test::request()
        .method("POST")
        .path("/api/sticky-notes")
        .json(&json!({
            "message": message,
            "signature": format!("sig-{message}"),
            "walletAddress": "wallet-1",
            "color": "pink",
        }))
}

pub fn parse_frame(msg: &Message) -> Value {
    let text = msg.to_str().expect("text frame");
    serde_json::from_str(text).expect("json frame")
}

pub fn messages_of(initial: &Value) -> Vec<String> {
    initial["data"]
        .as_array()
        .expect("initial data is a list")
        .iter()
        .map(|n| n["message"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Opens a WebSocket on a bound board and then never reads or writes, so pings
/// go unanswered. Returns the stream right after the `101` response.
pub async fn silent_ws_client(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream
        .write_all(
            b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: Upgrade\r\nUpgrade: websocket\r\n\
              Sec-WebSocket-Version: 13\r\nSec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\r\n",
        )
        .await
        .expect("handshake write");

    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        stream.read_exact(&mut byte).await.expect("handshake read");
        head.push(byte[0]);
    }
    assert!(head.starts_with(b"HTTP/1.1 101"), "{}", String::from_utf8_lossy(&head));
    stream
}
