//! History service: folds pages into feeds and emits notices.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    EventBus, FeedId, FeedRegistry, FeedSummary, HistoryEvent, HistoryNotice, PoolEvent,
};
use crate::error::HistoryError;
use crate::history::{
    AmountFormatter, DecimalFormatter, HistoryRow, MergeOptions, TokenDirectory, TokenResolver,
    history_rows, merge,
};

/// Validation limits applied to submitted pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Maximum records per page.
    pub max_page_size: usize,
    /// Reject pages whose ledgers break the configured page order.
    pub enforce_order: bool,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_page_size: 500,
            enforce_order: true,
        }
    }
}

/// Outcome of folding one page into a feed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngestReport {
    /// Feed the page was merged into.
    pub feed: FeedId,
    /// Raw records in the page.
    pub received: usize,
    /// Entries in the merged history.
    pub total: usize,
    /// Combined swap entries in the merged history.
    pub combined_swaps: usize,
    /// Pages merged into the feed so far.
    pub pages_merged: u64,
    /// `true` if this page created the feed.
    pub created: bool,
}

/// Orchestration layer for feed histories.
///
/// Owns references to the [`FeedRegistry`] for state and the [`EventBus`]
/// for notices. Every page follows the same pattern: validate → acquire
/// the feed's write lock → merge → update metadata → release → notify.
#[derive(Debug, Clone)]
pub struct HistoryService {
    registry: Arc<FeedRegistry>,
    event_bus: EventBus,
    options: MergeOptions,
    limits: PageLimits,
    resolver: Arc<dyn TokenResolver>,
    formatter: Arc<dyn AmountFormatter>,
}

impl HistoryService {
    /// Creates a service with an empty token directory and the decimal
    /// formatter.
    #[must_use]
    pub fn new(
        registry: Arc<FeedRegistry>,
        event_bus: EventBus,
        options: MergeOptions,
        limits: PageLimits,
    ) -> Self {
        Self {
            registry,
            event_bus,
            options,
            limits,
            resolver: Arc::new(TokenDirectory::default()),
            formatter: Arc::new(DecimalFormatter),
        }
    }

    /// Replaces the token resolver used for display rows.
    #[must_use]
    pub fn with_token_resolver(mut self, resolver: Arc<dyn TokenResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the amount formatter used for display rows.
    #[must_use]
    pub fn with_amount_formatter(mut self, formatter: Arc<dyn AmountFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`FeedRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<FeedRegistry> {
        &self.registry
    }

    /// Returns the merge options applied to every page.
    #[must_use]
    pub const fn merge_options(&self) -> &MergeOptions {
        &self.options
    }

    /// Folds one page into `feed`, creating the feed on its first page.
    ///
    /// The feed's write lock is held for the whole merge, so concurrent
    /// submissions for the same feed are applied one after another. A
    /// reset that lands while the page waits for the lock is applied first;
    /// the page then starts the fresh history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::PageTooLarge`] if the page exceeds the size
    /// limit and [`HistoryError::PageOrder`] if order enforcement is on
    /// and the page's ledgers break the configured direction.
    pub async fn ingest_page(
        &self,
        feed: &FeedId,
        records: Vec<PoolEvent>,
    ) -> Result<IngestReport, HistoryError> {
        let received = records.len();
        if received > self.limits.max_page_size {
            return Err(HistoryError::PageTooLarge {
                size: received,
                max: self.limits.max_page_size,
            });
        }
        if self.limits.enforce_order {
            self.options.page_order.check(&records)?;
        }

        // A reset between lookup and lock detaches the entry; retry on the
        // live one so the page is not merged into a dropped history.
        let (mut entry, created) = loop {
            let (handle, created) = self.registry.get_or_create(feed).await;
            if created {
                let _ = self.event_bus.publish(HistoryNotice::FeedCreated {
                    feed: feed.clone(),
                    timestamp: Utc::now(),
                });
            }
            let entry = Arc::clone(&handle).write_owned().await;
            if self.registry.is_current(feed, &handle).await {
                break (entry, created);
            }
            tracing::debug!(%feed, "feed reset while waiting for its lock, retrying");
        };

        let previous = std::mem::take(&mut entry.events);
        entry.events = merge(records, previous, &self.options);
        entry.pages_merged = entry.pages_merged.saturating_add(1);
        entry.records_received = entry.records_received.saturating_add(received as u64);
        entry.last_modified_at = Utc::now();

        let report = IngestReport {
            feed: feed.clone(),
            received,
            total: entry.events.len(),
            combined_swaps: entry.combined_swaps(),
            pages_merged: entry.pages_merged,
            created,
        };
        let oldest_ledger = entry.oldest_ledger();
        drop(entry);

        let _ = self.event_bus.publish(HistoryNotice::PageMerged {
            feed: feed.clone(),
            received,
            total: report.total,
            combined_swaps: report.combined_swaps,
            oldest_ledger,
            timestamp: Utc::now(),
        });

        tracing::info!(
            %feed,
            received,
            total = report.total,
            combined = report.combined_swaps,
            pages = report.pages_merged,
            "page merged"
        );
        Ok(report)
    }

    /// Returns a window of the feed's merged history and its total length.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn events_page(
        &self,
        feed: &FeedId,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<HistoryEvent>, usize), HistoryError> {
        let handle = self.registry.get(feed).await?;
        let entry = handle.read().await;
        let window = entry
            .events
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((window, entry.events.len()))
    }

    /// Returns display rows for a window of the feed's merged history and
    /// the history's total length.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn rows_page(
        &self,
        feed: &FeedId,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<HistoryRow>, usize), HistoryError> {
        let handle = self.registry.get(feed).await?;
        let entry = handle.read().await;
        let end = offset.saturating_add(limit).min(entry.events.len());
        let window = entry.events.get(offset..end).unwrap_or_default();
        let rows = history_rows(window, self.resolver.as_ref(), self.formatter.as_ref());
        Ok((rows, entry.events.len()))
    }

    /// Returns the summary of one feed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn summary(&self, feed: &FeedId) -> Result<FeedSummary, HistoryError> {
        let handle = self.registry.get(feed).await?;
        let entry = handle.read().await;
        Ok(FeedSummary::from(&*entry))
    }

    /// Returns summaries of all feeds.
    pub async fn list_feeds(&self) -> Vec<FeedSummary> {
        self.registry.list().await
    }

    /// Drops a feed's accumulated history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
    pub async fn reset_feed(&self, feed: &FeedId) -> Result<(), HistoryError> {
        let _handle = self.registry.remove(feed).await?;

        let _ = self.event_bus.publish(HistoryNotice::FeedReset {
            feed: feed.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%feed, "feed reset");
        Ok(())
    }
}
