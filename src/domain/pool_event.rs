//! Raw pool-activity records as delivered by the backend.
//!
//! One [`PoolEvent`] is one log entry for one pool. Multi-pool swaps are
//! logged as one `swap` record per pool ("hop"), all sharing the same
//! [`TransactionHash`]. Pages of these records arrive newest `ledger` first.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TransactionHash;

/// Kind of a raw pool event.
///
/// Type strings this crate does not interpret are preserved verbatim in
/// [`EventType::Other`] and handled as non-swap records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Liquidity deposited into the pool.
    Deposit,
    /// Liquidity withdrawn from the pool.
    Withdraw,
    /// One swap hop through the pool.
    Swap,
    /// Reward claim.
    Claim,
    /// Incentive reward claim.
    ClaimIncentives,
    /// Any other type string reported by the backend.
    Other(String),
}

impl EventType {
    /// Returns the wire string of this event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Swap => "swap",
            Self::Claim => "claim",
            Self::ClaimIncentives => "claim-incentives",
            Self::Other(other) => other,
        }
    }

    /// Returns `true` for the `swap` type.
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        matches!(self, Self::Swap)
    }
}

impl FromStr for EventType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "deposit" => Self::Deposit,
            "withdraw" => Self::Withdraw,
            "swap" => Self::Swap,
            "claim" => Self::Claim,
            "claim-incentives" | "claim_incentives" => Self::ClaimIncentives,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(event_type) => event_type,
            Err(never) => match never {},
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw activity record for one pool.
///
/// Amounts are signed decimal strings from the pool's perspective: a
/// positive amount was received by the pool (sent by the user), a negative
/// amount was paid out by the pool (received by the user). For swaps,
/// `tokens` is parallel to `amounts`; other records describe their tokens
/// through `pool_tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PoolEvent {
    /// Event kind (`deposit`, `withdraw`, `swap`, `claim`, ...).
    #[schema(value_type = String, example = "swap")]
    pub event_type: EventType,
    /// Ledger sequence the event was committed in.
    pub ledger: u64,
    /// Hash of the submitted transaction.
    pub transaction_hash: TransactionHash,
    /// Signed decimal amounts, one per involved token.
    pub amounts: Vec<String>,
    /// Token identifiers parallel to `amounts` (swap records).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
    /// Token identifiers of the pool (non-swap records).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pool_tokens: Vec<String>,
    /// Ledger close time as reported by the backend.
    pub ledger_close_at_str: String,
    /// Account that submitted the transaction.
    pub account_address: String,
}

impl PoolEvent {
    /// Returns `true` if this record is a raw swap hop.
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        self.event_type.is_swap()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const SWAP_JSON: &str = r#"{
        "event_type": "swap",
        "ledger": 51234567,
        "transaction_hash": "abc",
        "amounts": ["100", "-50"],
        "tokens": ["XLM", "USDC"],
        "ledger_close_at_str": "2024-05-01T10:00:00Z",
        "account_address": "GUSER"
    }"#;

    #[test]
    fn deserializes_backend_swap_record() {
        let Ok(event) = serde_json::from_str::<PoolEvent>(SWAP_JSON) else {
            panic!("swap record should parse");
        };
        assert!(event.is_swap());
        assert_eq!(event.ledger, 51_234_567);
        assert_eq!(event.tokens, vec!["XLM", "USDC"]);
        assert!(event.pool_tokens.is_empty());
        assert_eq!(event.transaction_hash.as_str(), "abc");
    }

    #[test]
    fn unknown_event_type_is_preserved() {
        let json = SWAP_JSON.replace("\"swap\"", "\"migrate\"");
        let Ok(event) = serde_json::from_str::<PoolEvent>(&json) else {
            panic!("unknown type should still parse");
        };
        assert_eq!(event.event_type, EventType::Other("migrate".to_string()));
        assert!(!event.is_swap());
        let out = serde_json::to_string(&event).unwrap_or_default();
        assert!(out.contains("\"migrate\""));
    }

    #[test]
    fn claim_incentives_accepts_both_spellings() {
        assert_eq!(
            EventType::from("claim_incentives".to_string()),
            EventType::ClaimIncentives
        );
        assert_eq!(
            EventType::from("claim-incentives".to_string()),
            EventType::ClaimIncentives
        );
        assert_eq!(EventType::ClaimIncentives.as_str(), "claim-incentives");
    }

    #[test]
    fn empty_token_lists_are_omitted_on_output() {
        let Ok(mut event) = serde_json::from_str::<PoolEvent>(SWAP_JSON) else {
            panic!("swap record should parse");
        };
        event.tokens.clear();
        let out = serde_json::to_string(&event).unwrap_or_default();
        assert!(!out.contains("\"tokens\""));
        assert!(!out.contains("pool_tokens"));
    }
}
