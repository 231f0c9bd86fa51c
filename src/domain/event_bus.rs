//! Broadcast channel for history notices.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every feed
//! mutation publishes a [`HistoryNotice`] through the bus, and all
//! WebSocket connections subscribe to receive filtered notices.

use tokio::sync::broadcast;

use super::HistoryNotice;

/// Broadcast bus for [`HistoryNotice`]s.
///
/// When the ring buffer is full, the oldest notices are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HistoryNotice>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a notice to all subscribers.
    ///
    /// Returns the number of receivers that received the notice. Without
    /// receivers the notice is dropped.
    pub fn publish(&self, notice: HistoryNotice) -> usize {
        self.sender.send(notice).unwrap_or(0)
    }

    /// Creates a new receiver for all future notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryNotice> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FeedId;
    use chrono::Utc;

    fn make_notice(feed: &str) -> HistoryNotice {
        let Ok(feed) = feed.parse::<FeedId>() else {
            panic!("valid feed id");
        };
        HistoryNotice::FeedCreated {
            feed,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(100);
        assert_eq!(bus.publish(make_notice("a")), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_notice() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();

        bus.publish(make_notice("GUSER"));

        let Ok(notice) = rx.recv().await else {
            panic!("expected to receive notice");
        };
        assert_eq!(notice.feed().as_str(), "GUSER");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notice() {
        let bus = EventBus::new(100);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.publish(make_notice("feed")), 2);

        let Ok(n1) = rx1.recv().await else {
            panic!("rx1 failed");
        };
        let Ok(n2) = rx2.recv().await else {
            panic!("rx2 failed");
        };
        assert_eq!(n1.feed(), n2.feed());
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(10);
        assert_eq!(bus.receiver_count(), 0);
        let rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(rx);
        assert_eq!(bus.receiver_count(), 0);
    }
}
