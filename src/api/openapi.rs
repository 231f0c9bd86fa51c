//! OpenAPI documentation generated with utoipa.

use utoipa::OpenApi;

use crate::api::dto::{
    EventListResponse, FeedListResponse, IngestPageRequest, IngestPageResponse, PaginationMeta,
    RowListResponse,
};
use crate::api::handlers::{feed, system};
use crate::domain::{CombinedKind, CombinedSwapEvent, FeedSummary, HistoryEvent, PoolEvent};
use crate::error::{ErrorBody, ErrorResponse};
use crate::history::{HistoryRow, RowKind, RowLeg};

/// OpenAPI documentation structure.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "amm-history API",
        description = "Accumulates paged AMM pool activity into histories where every multi-hop swap is one swap chain.",
    ),
    tags(
        (name = "Feeds", description = "Page ingestion and merged histories"),
        (name = "System", description = "Health check")
    ),
    paths(
        system::health_handler,
        feed::ingest_page,
        feed::list_feeds,
        feed::list_events,
        feed::list_rows,
        feed::reset_feed,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorBody,
            PaginationMeta,
            IngestPageRequest,
            IngestPageResponse,
            FeedListResponse,
            FeedSummary,
            EventListResponse,
            RowListResponse,
            HistoryEvent,
            PoolEvent,
            CombinedSwapEvent,
            CombinedKind,
            HistoryRow,
            RowKind,
            RowLeg,
            system::HealthResponse,
        )
    )
)]
pub struct ApiDoc;

/// Returns the OpenAPI document as JSON.
#[must_use]
pub fn openapi_json() -> String {
    ApiDoc::openapi().to_json().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_feed_paths() {
        let json = openapi_json();
        assert!(json.contains("amm-history API"));
        assert!(json.contains("/api/v1/feeds/{feed}/pages"));
        assert!(json.contains("/api/v1/feeds/{feed}/rows"));
        assert!(json.contains("/health"));
    }
}
