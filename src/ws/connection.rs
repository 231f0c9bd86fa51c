//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered notices.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{FeedId, HistoryNotice};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching notices from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut notice_rx: broadcast::Receiver<HistoryNotice>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Notice from EventBus
            notice = notice_rx.recv() => {
                match notice {
                    Ok(notice) => {
                        if subs.matches(notice.feed()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&notice).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Splits a command's feed list into valid feed IDs and the wildcard flag.
/// Invalid IDs are skipped.
fn parse_feeds(raw: &[String]) -> (Vec<FeedId>, bool) {
    let mut feeds = Vec::new();
    let mut wildcard = false;
    for value in raw {
        if value == "*" {
            wildcard = true;
        } else if let Ok(feed) = value.parse::<FeedId>() {
            feeds.push(feed);
        } else {
            tracing::debug!(feed = %value, "ignoring invalid feed id in ws command");
        }
    }
    (feeds, wildcard)
}

fn feed_names(feeds: &[FeedId]) -> Vec<&str> {
    feeds.iter().map(FeedId::as_str).collect()
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error("", 400, "malformed JSON")).ok();
    };

    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }

    let response = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(WsCommand::Subscribe { feeds }) => {
            let (feeds, wildcard) = parse_feeds(&feeds);
            subs.subscribe(&feeds, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": feed_names(&feeds),
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        Ok(WsCommand::Unsubscribe { feeds }) => {
            let (feeds, wildcard) = parse_feeds(&feeds);
            subs.unsubscribe(&feeds, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": feed_names(&feeds),
                    "remaining_count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        Err(_) => WsMessage::error(msg.id, 404, "unknown command"),
    };
    serde_json::to_string(&response).ok()
}
