//! Notices emitted when an accumulated history changes.
//!
//! Every feed mutation publishes a [`HistoryNotice`] through the
//! [`super::EventBus`]. Notices are forwarded to WebSocket subscribers so
//! presentation layers know when to re-read a feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FeedId;

/// Domain notice emitted after every feed mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum HistoryNotice {
    /// A feed received its first page.
    FeedCreated {
        /// Feed identifier.
        feed: FeedId,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A page was merged into a feed.
    PageMerged {
        /// Feed identifier.
        feed: FeedId,
        /// Number of raw records in the page.
        received: usize,
        /// Number of entries in the merged history.
        total: usize,
        /// Number of combined swap entries in the merged history.
        combined_swaps: usize,
        /// Oldest ledger present in the merged history.
        oldest_ledger: Option<u64>,
        /// Merge timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A feed's accumulated history was dropped.
    FeedReset {
        /// Feed identifier.
        feed: FeedId,
        /// Reset timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl HistoryNotice {
    /// Returns the feed this notice refers to.
    #[must_use]
    pub const fn feed(&self) -> &FeedId {
        match self {
            Self::FeedCreated { feed, .. }
            | Self::PageMerged { feed, .. }
            | Self::FeedReset { feed, .. } => feed,
        }
    }

    /// Returns the notice type as a static string slice.
    #[must_use]
    pub const fn notice_str(&self) -> &'static str {
        match self {
            Self::FeedCreated { .. } => "feed_created",
            Self::PageMerged { .. } => "page_merged",
            Self::FeedReset { .. } => "feed_reset",
        }
    }
}
