//! Identifier of an accumulated history feed.
//!
//! A feed is whatever the paging controller pages through: usually one
//! account's activity or one pool's activity. The identifier is chosen by
//! the caller and only has to be stable across page submissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HistoryError;

/// Maximum accepted length of a feed identifier.
pub const MAX_FEED_ID_LEN: usize = 128;

/// Caller-chosen identifier of one accumulated history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FeedId(String);

impl FeedId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FeedId {
    type Err = HistoryError;

    /// Parses a feed identifier.
    ///
    /// Accepts 1 to [`MAX_FEED_ID_LEN`] characters of ASCII alphanumerics,
    /// `-`, `_`, `:` and `.`. The wildcard `*` is reserved for WebSocket
    /// subscriptions and rejected here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > MAX_FEED_ID_LEN {
            return Err(HistoryError::InvalidRequest(format!(
                "feed id must be 1..={MAX_FEED_ID_LEN} characters"
            )));
        }
        let valid = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
        if !valid {
            return Err(HistoryError::InvalidRequest(format!(
                "invalid feed id: {s}"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
