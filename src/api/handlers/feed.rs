//! Feed handlers: ingest pages, list feeds, read history, reset.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{
    EventListResponse, FeedListResponse, IngestPageRequest, IngestPageResponse, PaginationParams,
    RowListResponse,
};
use crate::app_state::AppState;
use crate::domain::FeedId;
use crate::error::{ErrorResponse, HistoryError};

/// `POST /feeds/{feed}/pages`: Merge one page of raw records into a feed.
///
/// # Errors
///
/// Returns [`HistoryError`] on an invalid feed id, an oversized page, or a
/// page out of the configured order.
#[utoipa::path(
    post,
    path = "/api/v1/feeds/{feed}/pages",
    tag = "Feeds",
    summary = "Submit a page of raw records",
    description = "Folds one page of raw pool events into the feed's accumulated history. Swap hops that share a transaction are combined into one swap chain, including hops split across pages. The feed is created on its first page.",
    params(
        ("feed" = String, Path, description = "Feed identifier"),
    ),
    request_body = IngestPageRequest,
    responses(
        (status = 200, description = "Page merged", body = IngestPageResponse),
        (status = 400, description = "Invalid feed id, page too large, or page out of order", body = ErrorResponse),
    )
)]
pub async fn ingest_page(
    State(state): State<AppState>,
    Path(feed): Path<String>,
    Json(req): Json<IngestPageRequest>,
) -> Result<impl IntoResponse, HistoryError> {
    let feed: FeedId = feed.parse()?;
    let report = state
        .history_service
        .ingest_page(&feed, req.records)
        .await?;
    Ok(Json(IngestPageResponse::from(report)))
}

/// `GET /feeds`: List all feeds.
#[utoipa::path(
    get,
    path = "/api/v1/feeds",
    tag = "Feeds",
    summary = "List feeds",
    description = "Returns a summary of every feed with accumulated history.",
    responses(
        (status = 200, description = "Feed summaries", body = FeedListResponse),
    )
)]
pub async fn list_feeds(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.history_service.list_feeds().await;
    Json(FeedListResponse { data })
}

/// `GET /feeds/{feed}/events`: Read the merged history.
///
/// # Errors
///
/// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{feed}/events",
    tag = "Feeds",
    summary = "Get merged history",
    description = "Returns the feed's merged history, ledger descending. Entries are either raw records or combined swap chains (`event_type = swap_combined`).",
    params(
        ("feed" = String, Path, description = "Feed identifier"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated history", body = EventListResponse),
        (status = 404, description = "Feed not found", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Path(feed): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, HistoryError> {
    let feed: FeedId = feed.parse()?;
    let params = params.clamped();
    let (data, total) = state
        .history_service
        .events_page(&feed, params.offset(), params.per_page as usize)
        .await?;

    Ok(Json(EventListResponse {
        feed,
        data,
        pagination: params.meta(total),
    }))
}

/// `GET /feeds/{feed}/rows`: Read the history as display rows.
///
/// # Errors
///
/// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/feeds/{feed}/rows",
    tag = "Feeds",
    summary = "Get display rows",
    description = "Returns the feed's merged history rendered for display: token codes resolved, amounts rounded, swap paths expanded.",
    params(
        ("feed" = String, Path, description = "Feed identifier"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated rows", body = RowListResponse),
        (status = 404, description = "Feed not found", body = ErrorResponse),
    )
)]
pub async fn list_rows(
    State(state): State<AppState>,
    Path(feed): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, HistoryError> {
    let feed: FeedId = feed.parse()?;
    let params = params.clamped();
    let (data, total) = state
        .history_service
        .rows_page(&feed, params.offset(), params.per_page as usize)
        .await?;

    Ok(Json(RowListResponse {
        feed,
        data,
        pagination: params.meta(total),
    }))
}

/// `DELETE /feeds/{feed}`: Drop a feed's accumulated history.
///
/// # Errors
///
/// Returns [`HistoryError::FeedNotFound`] if the feed does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/feeds/{feed}",
    tag = "Feeds",
    summary = "Reset a feed",
    description = "Drops the feed's accumulated history and emits a feed_reset notice. The next page starts a fresh history.",
    params(
        ("feed" = String, Path, description = "Feed identifier"),
    ),
    responses(
        (status = 204, description = "Feed reset"),
        (status = 404, description = "Feed not found", body = ErrorResponse),
    )
)]
pub async fn reset_feed(
    State(state): State<AppState>,
    Path(feed): Path<String>,
) -> Result<impl IntoResponse, HistoryError> {
    let feed: FeedId = feed.parse()?;
    state.history_service.reset_feed(&feed).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Feed routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feeds", get(list_feeds))
        .route("/feeds/{feed}", delete(reset_feed))
        .route("/feeds/{feed}/pages", post(ingest_page))
        .route("/feeds/{feed}/events", get(list_events))
        .route("/feeds/{feed}/rows", get(list_rows))
}
