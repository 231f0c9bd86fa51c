//! Transaction hash identifier.
//!
//! [`TransactionHash`] wraps the backend's hex transaction hash so that it
//! cannot be confused with token or account identifiers. All hops of one
//! submitted transaction share the same hash.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hash of the submitted transaction a pool event belongs to.
///
/// Used as the grouping key when assembling swap chains and when
/// reconciling a new page against previously merged history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionHash(String);

impl TransactionHash {
    /// Creates a `TransactionHash` from any string-like value.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionHash {
    fn from(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl From<String> for TransactionHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_hash() {
        let hash = TransactionHash::from("abc123");
        assert_eq!(format!("{hash}"), "abc123");
    }

    #[test]
    fn serializes_transparently() {
        let hash = TransactionHash::new("deadbeef");
        let json = serde_json::to_string(&hash).unwrap_or_default();
        assert_eq!(json, "\"deadbeef\"");
        let Ok(back) = serde_json::from_str::<TransactionHash>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, hash);
    }

    #[test]
    fn equal_hashes_group_together() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(TransactionHash::from("tx"), 1);
        assert_eq!(map.get(&TransactionHash::new(String::from("tx"))), Some(&1));
    }
}
