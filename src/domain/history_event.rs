//! Entries of a merged history: raw records or combined swap chains.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CombinedKind, CombinedSwapEvent, PoolEvent, TransactionHash};

/// One entry of a processed history.
///
/// Serialized untagged: the `event_type` field (`swap_combined` versus the
/// raw types) tells the two shapes apart on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum HistoryEvent {
    /// A multi-hop swap assembled from raw hops.
    Combined(CombinedSwapEvent),
    /// A raw record passed through unchanged.
    Raw(PoolEvent),
}

impl HistoryEvent {
    /// Ledger sequence used as the primary ordering key.
    #[must_use]
    pub const fn ledger(&self) -> u64 {
        match self {
            Self::Combined(combined) => combined.ledger,
            Self::Raw(raw) => raw.ledger,
        }
    }

    /// Transaction hash of the entry.
    #[must_use]
    pub const fn transaction_hash(&self) -> &TransactionHash {
        match self {
            Self::Combined(combined) => &combined.transaction_hash,
            Self::Raw(raw) => &raw.transaction_hash,
        }
    }

    /// Event type wire string (`swap_combined` for combined entries).
    #[must_use]
    pub fn event_type_str(&self) -> &str {
        match self {
            Self::Combined(_) => CombinedKind::AS_STR,
            Self::Raw(raw) => raw.event_type.as_str(),
        }
    }

    /// Token identifiers of the entry.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Combined(combined) => &combined.tokens,
            Self::Raw(raw) => &raw.tokens,
        }
    }

    /// Amounts of the entry.
    #[must_use]
    pub fn amounts(&self) -> &[String] {
        match self {
            Self::Combined(combined) => &combined.amounts,
            Self::Raw(raw) => &raw.amounts,
        }
    }

    /// `true` for raw swap hops and combined swaps.
    #[must_use]
    pub const fn is_swap_related(&self) -> bool {
        match self {
            Self::Combined(_) => true,
            Self::Raw(raw) => raw.is_swap(),
        }
    }

    /// `true` if this entry is a raw swap hop.
    #[must_use]
    pub const fn is_raw_swap(&self) -> bool {
        matches!(self, Self::Raw(raw) if raw.is_swap())
    }

    /// Returns the combined record, if this entry is one.
    #[must_use]
    pub const fn as_combined(&self) -> Option<&CombinedSwapEvent> {
        match self {
            Self::Combined(combined) => Some(combined),
            Self::Raw(_) => None,
        }
    }
}

impl From<PoolEvent> for HistoryEvent {
    fn from(raw: PoolEvent) -> Self {
        Self::Raw(raw)
    }
}

impl From<CombinedSwapEvent> for HistoryEvent {
    fn from(combined: CombinedSwapEvent) -> Self {
        Self::Combined(combined)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventType;

    fn raw(event_type: EventType) -> PoolEvent {
        PoolEvent {
            event_type,
            ledger: 10,
            transaction_hash: TransactionHash::from("tx"),
            amounts: vec!["100".to_string(), "-50".to_string()],
            tokens: vec!["XLM".to_string(), "USDC".to_string()],
            pool_tokens: Vec::new(),
            ledger_close_at_str: "2024-05-01T10:00:00Z".to_string(),
            account_address: "GUSER".to_string(),
        }
    }

    fn combined() -> CombinedSwapEvent {
        CombinedSwapEvent {
            event_type: CombinedKind::SwapCombined,
            ledger: 11,
            transaction_hash: TransactionHash::from("tx"),
            amounts: vec!["100".to_string(), "-1000".to_string()],
            tokens: vec!["XLM".to_string(), "AQUA".to_string()],
            pool_tokens: Vec::new(),
            ledger_close_at_str: "2024-05-01T10:00:00Z".to_string(),
            account_address: "GUSER".to_string(),
            original_swaps: vec![raw(EventType::Swap)],
            path: vec!["XLM".to_string(), "USDC".to_string(), "AQUA".to_string()],
        }
    }

    #[test]
    fn accessors_cover_both_shapes() {
        let r = HistoryEvent::from(raw(EventType::Deposit));
        assert_eq!(r.ledger(), 10);
        assert_eq!(r.event_type_str(), "deposit");
        assert!(!r.is_swap_related());

        let c = HistoryEvent::from(combined());
        assert_eq!(c.ledger(), 11);
        assert_eq!(c.event_type_str(), "swap_combined");
        assert!(c.is_swap_related());
        assert!(!c.is_raw_swap());
        assert_eq!(c.tokens(), ["XLM", "AQUA"]);
    }

    #[test]
    fn untagged_round_trip_keeps_shape() {
        let events = vec![
            HistoryEvent::from(combined()),
            HistoryEvent::from(raw(EventType::Swap)),
        ];
        let json = serde_json::to_string(&events).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"swap_combined\""));
        let Ok(back) = serde_json::from_str::<Vec<HistoryEvent>>(&json) else {
            panic!("history should deserialize");
        };
        assert_eq!(back, events);
        assert!(back.first().and_then(HistoryEvent::as_combined).is_some());
        assert!(back.get(1).is_some_and(HistoryEvent::is_raw_swap));
    }
}
