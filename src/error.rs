//! Service error types with HTTP status code mapping.
//!
//! The reconciliation engine itself never fails; [`HistoryError`] covers
//! the service and API layers around it. Each variant maps to a specific
//! HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::history::{PageOrderViolation, TokenDirectoryError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "page too large: 900 records (max 500)",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The submitted page exceeds the configured size limit.
    #[error("page too large: {size} records (max {max})")]
    PageTooLarge {
        /// Records in the submitted page.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The submitted page is not ordered in the configured direction.
    #[error("page out of order: {0}")]
    PageOrder(#[from] PageOrderViolation),

    /// No history exists for the feed.
    #[error("feed not found: {0}")]
    FeedNotFound(String),

    /// The token directory could not be loaded.
    #[error("token directory error: {0}")]
    TokenDirectory(#[from] TokenDirectoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HistoryError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::PageTooLarge { .. } => 1002,
            Self::PageOrder(_) => 1003,
            Self::FeedNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::TokenDirectory(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::PageTooLarge { .. } | Self::PageOrder(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::FeedNotFound(_) => StatusCode::NOT_FOUND,
            Self::TokenDirectory(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::PageOrder(violation) => Some(format!(
                "position={} previous_ledger={} ledger={}",
                violation.position, violation.previous, violation.current
            )),
            _ => None,
        }
    }
}

impl IntoResponse for HistoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::PageOrder;

    #[test]
    fn codes_and_statuses_line_up() {
        let err = HistoryError::PageTooLarge { size: 9, max: 5 };
        assert_eq!(err.error_code(), 1002);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "page too large: 9 records (max 5)");

        let err = HistoryError::FeedNotFound("GUSER".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn page_order_violation_carries_details() {
        let err = HistoryError::from(PageOrderViolation {
            order: PageOrder::NewestFirst,
            position: 3,
            previous: 10,
            current: 12,
        });
        assert_eq!(err.error_code(), 1003);
        assert_eq!(
            err.details().as_deref(),
            Some("position=3 previous_ledger=10 ledger=12")
        );
    }

    #[test]
    fn into_response_sets_status() {
        let response = HistoryError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
