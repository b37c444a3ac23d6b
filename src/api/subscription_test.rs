use std::sync::Arc;

use super::*;
use crate::test_utils::context_with;
use crate::test_utils::submission;
use crate::BoardConfig;
use crate::EvictionCause;
use crate::FeedEvent;
use crate::IngressApi;
use crate::Note;
use crate::Outbound;
use crate::SubscriberState;
use crate::SubscriberFeed;

fn setup() -> (Arc<BoardContext>, IngressApi, SubscriptionEndpoint) {
    let ctx = context_with(BoardConfig::default());
    (
        ctx.clone(),
        IngressApi::new(ctx.clone()),
        SubscriptionEndpoint::new(ctx),
    )
}

async fn next_event(feed: &mut SubscriberFeed) -> FeedEvent {
    match feed.recv().await {
        Some(Outbound::Frame(frame)) => serde_json::from_str(&frame).unwrap(),
        other => panic!("expected a frame, got {other:?}"),
    }
}

#[tokio::test]
async fn attach_should_queue_initial_snapshot_first() {
    let (_ctx, api, endpoint) = setup();
    let a = api.submit(&submission("a")).unwrap();
    let b = api.submit(&submission("b")).unwrap();

    let mut session = endpoint.attach().unwrap();

    assert_eq!(session.subscriber.state(), SubscriberState::Live);
    assert_eq!(next_event(&mut session.feed).await, FeedEvent::Initial(vec![a, b]));
}

#[tokio::test]
async fn attach_on_empty_board_should_send_empty_snapshot() {
    let (_ctx, _api, endpoint) = setup();

    let mut session = endpoint.attach().unwrap();

    assert_eq!(next_event(&mut session.feed).await, FeedEvent::Initial(vec![]));
}

#[tokio::test]
async fn existing_subscriber_gets_note_once_and_newcomer_gets_it_in_snapshot() {
    let (_ctx, api, endpoint) = setup();
    let mut first = endpoint.attach().unwrap();
    assert_eq!(next_event(&mut first.feed).await, FeedEvent::Initial(vec![]));

    let note = api.submit(&submission("hello")).unwrap();

    assert_eq!(next_event(&mut first.feed).await, FeedEvent::Note(note.clone()));
    let extra = tokio::time::timeout(std::time::Duration::from_millis(20), first.feed.recv()).await;
    assert!(extra.is_err(), "exactly one incremental message expected");

    let mut second = endpoint.attach().unwrap();
    assert_eq!(next_event(&mut second.feed).await, FeedEvent::Initial(vec![note]));
    let extra = tokio::time::timeout(std::time::Duration::from_millis(20), second.feed.recv()).await;
    assert!(extra.is_err(), "no replay of notes already in the snapshot");
}

#[tokio::test]
async fn concurrent_attach_and_submit_should_never_duplicate_or_lose_notes() {
    let (_ctx, api, endpoint) = setup();

    let writer = {
        let api = api.clone();
        std::thread::spawn(move || {
            (0..100)
                .map(|i| api.submit(&submission(&format!("n{i}"))).unwrap())
                .collect::<Vec<Note>>()
        })
    };
    let mut session = endpoint.attach().unwrap();
    let submitted = writer.join().unwrap();

    let mut seen: Vec<Note> = match next_event(&mut session.feed).await {
        FeedEvent::Initial(notes) => notes,
        other => panic!("expected initial snapshot, got {other:?}"),
    };
    while seen.len() < submitted.len() {
        match next_event(&mut session.feed).await {
            FeedEvent::Note(note) => seen.push(note),
            other => panic!("unexpected {other:?}"),
        }
    }

    assert_eq!(seen, submitted);
}

#[test]
fn detach_should_be_idempotent() {
    let (ctx, _api, endpoint) = setup();
    let session = endpoint.attach().unwrap();
    let id = session.subscriber.id();

    assert!(endpoint.detach(id, EvictionCause::Disconnected));
    assert!(!endpoint.detach(id, EvictionCause::Disconnected));
    assert!(ctx.registry().is_empty());
}
