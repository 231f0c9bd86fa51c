//! Per-connection subscription manager.
//!
//! Tracks which feeds a WebSocket client is subscribed to and provides
//! server-side notice filtering.

use std::collections::HashSet;

use crate::domain::FeedId;

/// Manages the set of feed subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed feeds. If `subscribe_all` is true, this set is ignored.
    feeds: HashSet<FeedId>,
    /// Whether the client subscribes to all feeds (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds feeds to the subscription set and optionally enables the
    /// wildcard.
    pub fn subscribe(&mut self, feeds: &[FeedId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.feeds.extend(feeds.iter().cloned());
    }

    /// Removes feeds from the subscription set and optionally clears the
    /// wildcard.
    pub fn unsubscribe(&mut self, feeds: &[FeedId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for feed in feeds {
            self.feeds.remove(feed);
        }
    }

    /// Returns `true` if the given feed matches the subscription filter.
    #[must_use]
    pub fn matches(&self, feed: &FeedId) -> bool {
        self.subscribe_all || self.feeds.contains(feed)
    }

    /// Returns the number of explicitly subscribed feeds.
    #[must_use]
    pub fn count(&self) -> usize {
        self.feeds.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
