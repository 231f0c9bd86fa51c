//! Accumulated history of one feed plus bookkeeping metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{FeedId, HistoryEvent};

/// Aggregate holding one feed's merged history.
///
/// `events` is always the exact return value of the previous merge, so the
/// next page can be folded into it.
#[derive(Debug)]
pub struct FeedEntry {
    /// Feed identifier (immutable after creation).
    pub feed: FeedId,

    /// Merged history, ledger descending.
    pub events: Vec<HistoryEvent>,

    /// Number of pages folded into this feed.
    pub pages_merged: u64,

    /// Total raw records received across all pages.
    pub records_received: u64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last merge or reset.
    pub last_modified_at: DateTime<Utc>,
}

impl FeedEntry {
    /// Creates an empty entry for `feed`.
    #[must_use]
    pub fn new(feed: FeedId) -> Self {
        let now = Utc::now();
        Self {
            feed,
            events: Vec::new(),
            pages_merged: 0,
            records_received: 0,
            created_at: now,
            last_modified_at: now,
        }
    }

    /// Number of combined swap entries in the history.
    #[must_use]
    pub fn combined_swaps(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.as_combined().is_some())
            .count()
    }

    /// Newest ledger in the history.
    #[must_use]
    pub fn newest_ledger(&self) -> Option<u64> {
        self.events.iter().map(HistoryEvent::ledger).max()
    }

    /// Oldest ledger in the history.
    #[must_use]
    pub fn oldest_ledger(&self) -> Option<u64> {
        self.events.iter().map(HistoryEvent::ledger).min()
    }
}

/// Lightweight summary of a feed for list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedSummary {
    /// Feed identifier.
    pub feed: FeedId,
    /// Number of merged entries.
    pub entries: usize,
    /// Number of combined swap entries.
    pub combined_swaps: usize,
    /// Pages folded so far.
    pub pages_merged: u64,
    /// Newest ledger present.
    pub newest_ledger: Option<u64>,
    /// Oldest ledger present.
    pub oldest_ledger: Option<u64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_modified_at: DateTime<Utc>,
}

impl From<&FeedEntry> for FeedSummary {
    fn from(entry: &FeedEntry) -> Self {
        Self {
            feed: entry.feed.clone(),
            entries: entry.events.len(),
            combined_swaps: entry.combined_swaps(),
            pages_merged: entry.pages_merged,
            newest_ledger: entry.newest_ledger(),
            oldest_ledger: entry.oldest_ledger(),
            created_at: entry.created_at,
            last_modified_at: entry.last_modified_at,
        }
    }
}
