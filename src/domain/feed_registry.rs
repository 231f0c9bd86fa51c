//! Concurrent feed storage with per-feed locking.
//!
//! [`FeedRegistry`] stores every feed in a `HashMap` where each entry is
//! individually protected by a [`tokio::sync::RwLock`]. Merges into one
//! feed hold that feed's write lock for the whole fold, so pages of the
//! same feed are merged strictly one after another while different feeds
//! proceed concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::FeedId;
use super::feed_entry::{FeedEntry, FeedSummary};
use crate::error::HistoryError;

/// Shared handle to one feed's entry.
pub type FeedHandle = Arc<RwLock<FeedEntry>>;

/// Central store for all accumulated histories.
#[derive(Debug, Default)]
pub struct FeedRegistry {
    feeds: RwLock<HashMap<FeedId, FeedHandle>>,
}

impl FeedRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the feed's entry, creating an empty one if needed.
    ///
    /// The boolean is `true` when the entry was created by this call.
    pub async fn get_or_create(&self, feed: &FeedId) -> (FeedHandle, bool) {
        if let Some(handle) = self.feeds.read().await.get(feed) {
            return (Arc::clone(handle), false);
        }
        let mut map = self.feeds.write().await;
        // Another task may have created it between the two locks.
        if let Some(handle) = map.get(feed) {
            return (Arc::clone(handle), false);
        }
        let handle = Arc::new(RwLock::new(FeedEntry::new(feed.clone())));
        map.insert(feed.clone(), Arc::clone(&handle));
        (handle, true)
    }

    /// Returns the feed's entry behind its lock.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn get(&self, feed: &FeedId) -> Result<FeedHandle, HistoryError> {
        let map = self.feeds.read().await;
        map.get(feed)
            .map(Arc::clone)
            .ok_or_else(|| HistoryError::FeedNotFound(feed.to_string()))
    }

    /// Returns `true` if `feed` is still mapped to exactly `handle`.
    ///
    /// A handle obtained earlier goes stale once the feed is removed, even
    /// if a new entry has since been created under the same id.
    pub async fn is_current(&self, feed: &FeedId, handle: &FeedHandle) -> bool {
        self.feeds
            .read()
            .await
            .get(feed)
            .is_some_and(|current| Arc::ptr_eq(current, handle))
    }

    /// Removes a feed, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn remove(&self, feed: &FeedId) -> Result<FeedHandle, HistoryError> {
        self.feeds
            .write()
            .await
            .remove(feed)
            .ok_or_else(|| HistoryError::FeedNotFound(feed.to_string()))
    }

    /// Returns summaries of all feeds, ordered by feed id.
    pub async fn list(&self) -> Vec<FeedSummary> {
        let handles: Vec<FeedHandle> = self.feeds.read().await.values().map(Arc::clone).collect();
        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            let entry = handle.read().await;
            summaries.push(FeedSummary::from(&*entry));
        }
        summaries.sort_by(|a, b| a.feed.cmp(&b.feed));
        summaries
    }

    /// Returns the number of feeds.
    pub async fn len(&self) -> usize {
        self.feeds.read().await.len()
    }

    /// Returns `true` if no feed is stored.
    pub async fn is_empty(&self) -> bool {
        self.feeds.read().await.is_empty()
    }
}
