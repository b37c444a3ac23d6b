use std::time::Duration;

use futures::SinkExt;
use futures::StreamExt;
use tokio::time::timeout;
use tracing::debug;
use tracing::error;
use tracing::warn;
use warp::ws::Message;
use warp::ws::WebSocket;

use crate::EvictionCause;
use crate::FeedError;
use crate::FeedSession;
use crate::Outbound;
use crate::SubscriptionEndpoint;

/// Serves one live subscriber until it disconnects or is evicted.
///
/// Outbound frames come from the subscriber's outbox; every socket write is
/// bounded by `send_timeout`. Any inbound frame counts as a liveness
/// response.
pub(super) async fn serve_subscriber(
    socket: WebSocket,
    endpoint: SubscriptionEndpoint,
    send_timeout: Duration,
) {
    let FeedSession { subscriber, mut feed } = match endpoint.attach() {
        Ok(session) => session,
        Err(e) => {
            error!("failed to attach subscriber: {}", e);
            return;
        }
    };
    let id = subscriber.id();
    let (mut sink, mut stream) = socket.split();

    // `None` means the registry already removed the subscriber
    let cause: Option<EvictionCause> = loop {
        tokio::select! {
            outbound = feed.recv() => {
                let Some(outbound) = outbound else {
                    break None;
                };
                let message = match outbound {
                    Outbound::Frame(frame) => Message::text(&*frame),
                    Outbound::Probe => Message::ping(Vec::new()),
                };
                match timeout(send_timeout, sink.send(message)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        debug!("subscriber {}: {}", id, FeedError::Transport(e));
                        break Some(EvictionCause::DeliveryFailure);
                    }
                    Err(_) => {
                        warn!("{}", FeedError::SendTimeout { id, duration: send_timeout });
                        break Some(EvictionCause::DeliveryFailure);
                    }
                }
            }
            inbound = stream.next() => match inbound {
                Some(Ok(message)) if message.is_close() => break Some(EvictionCause::Disconnected),
                Some(Ok(_)) => subscriber.mark_alive(),
                Some(Err(e)) => {
                    debug!("subscriber {} read failed: {}", id, e);
                    break Some(EvictionCause::Disconnected);
                }
                None => break Some(EvictionCause::Disconnected),
            }
        }
    };

    if let Some(cause) = cause {
        endpoint.detach(id, cause);
    }
    if let Ok(Err(e)) = timeout(send_timeout, sink.close()).await {
        debug!("subscriber {} close failed: {}", id, e);
    }
}
