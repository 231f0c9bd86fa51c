//! Request and response bodies of the feed endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PaginationMeta;
use crate::domain::{FeedId, FeedSummary, HistoryEvent, PoolEvent};
use crate::history::HistoryRow;
use crate::service::IngestReport;

/// Request body for `POST /feeds/{feed}/pages`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngestPageRequest {
    /// Raw records of one page, in the feed's configured page order.
    pub records: Vec<PoolEvent>,
}

/// Response body for `POST /feeds/{feed}/pages`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngestPageResponse {
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
}

impl From<IngestReport> for IngestPageResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            feed: report.feed,
            received: report.received,
            total: report.total,
            combined_swaps: report.combined_swaps,
            pages_merged: report.pages_merged,
        }
    }
}

/// Response body for `GET /feeds`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedListResponse {
    /// Summaries of all feeds, sorted by feed id.
    pub data: Vec<FeedSummary>,
}

/// Paginated merged history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Feed the entries belong to.
    pub feed: FeedId,
    /// Entries on this page, ledger descending.
    pub data: Vec<HistoryEvent>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Paginated display rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RowListResponse {
    /// Feed the rows belong to.
    pub feed: FeedId,
    /// Rows on this page, ledger descending.
    pub data: Vec<HistoryRow>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
