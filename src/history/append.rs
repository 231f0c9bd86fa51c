//! Duplicate-suppressing concatenation of history entries.

use std::collections::HashSet;

use crate::domain::{HistoryEvent, PoolEvent, TransactionHash};

/// Structural identity of a history entry.
///
/// Two entries with the same transaction hash, event type, ledger, tokens
/// and amounts are considered the same record. Tokens and amounts are
/// compared element-wise rather than as joined strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    transaction_hash: TransactionHash,
    event_type: String,
    ledger: u64,
    tokens: Vec<String>,
    amounts: Vec<String>,
}

impl DedupKey {
    /// Key of a history entry.
    #[must_use]
    pub fn of(event: &HistoryEvent) -> Self {
        Self {
            transaction_hash: event.transaction_hash().clone(),
            event_type: event.event_type_str().to_string(),
            ledger: event.ledger(),
            tokens: event.tokens().to_vec(),
            amounts: event.amounts().to_vec(),
        }
    }

    /// Key of a raw record.
    #[must_use]
    pub fn of_raw(event: &PoolEvent) -> Self {
        Self {
            transaction_hash: event.transaction_hash.clone(),
            event_type: event.event_type.as_str().to_string(),
            ledger: event.ledger,
            tokens: event.tokens.clone(),
            amounts: event.amounts.clone(),
        }
    }
}

/// Incremental list builder that drops structurally duplicate entries.
///
/// Keeps its key set between appends, so building a list of `n` entries
/// costs `O(n)` key computations regardless of how many appends it took.
#[derive(Debug, Default)]
pub struct UniqueAppender {
    events: Vec<HistoryEvent>,
    keys: HashSet<DedupKey>,
}

impl UniqueAppender {
    /// Creates an empty appender.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty appender with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            keys: HashSet::with_capacity(capacity),
        }
    }

    /// Appends `event` unless an identical entry is already present.
    ///
    /// Returns `true` if the entry was appended.
    pub fn push(&mut self, event: HistoryEvent) -> bool {
        if !self.keys.insert(DedupKey::of(&event)) {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Appends every entry of `incoming` that is not already present,
    /// including entries appended earlier in the same call.
    ///
    /// Returns the number of entries appended.
    pub fn extend<I: IntoIterator<Item = HistoryEvent>>(&mut self, incoming: I) -> usize {
        incoming
            .into_iter()
            .map(|event| usize::from(self.push(event)))
            .sum()
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if no entry is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consumes the appender, returning the entries in append order.
    #[must_use]
    pub fn into_events(self) -> Vec<HistoryEvent> {
        self.events
    }
}

/// Merges `incoming` into `target`, skipping structural duplicates.
///
/// Takes ownership of `target` and returns the merged list, so no caller
/// array is mutated behind its back. Duplicates already present inside
/// `target` are collapsed too (first occurrence wins), which guarantees
/// that no two entries of the result share a [`DedupKey`].
#[must_use]
pub fn append_unique<I>(target: Vec<HistoryEvent>, incoming: I) -> Vec<HistoryEvent>
where
    I: IntoIterator<Item = HistoryEvent>,
{
    let mut appender = UniqueAppender::with_capacity(target.len());
    appender.extend(target);
    appender.extend(incoming);
    appender.into_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventType;
    use crate::history::testing::{liquidity, swap};

    fn raw(event: PoolEvent) -> HistoryEvent {
        HistoryEvent::Raw(event)
    }

    #[test]
    fn identical_incoming_records_are_dropped() {
        let deposit = raw(liquidity(EventType::Deposit, "t", 5, ["10", "20"]));
        let merged = append_unique(vec![deposit.clone()], vec![deposit.clone(), deposit]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn records_differing_in_any_key_field_are_kept() {
        let base = liquidity(EventType::Deposit, "t", 5, ["10", "20"]);
        let mut other_amount = base.clone();
        other_amount.amounts = vec!["10".to_string(), "21".to_string()];
        let mut other_ledger = base.clone();
        other_ledger.ledger = 6;
        let mut other_type = base.clone();
        other_type.event_type = EventType::Withdraw;

        let merged = append_unique(
            vec![raw(base)],
            vec![raw(other_amount), raw(other_ledger), raw(other_type)],
        );
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn duplicates_within_incoming_are_collapsed() {
        let hop = raw(swap("s", 1, ["A", "B"], ["1", "-2"]));
        let merged = append_unique(Vec::new(), vec![hop.clone(), hop]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn duplicates_within_target_are_collapsed() {
        let claim = raw(liquidity(EventType::Claim, "c", 2, ["0", "-1"]));
        let merged = append_unique(vec![claim.clone(), claim], Vec::new());
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn result_preserves_target_then_incoming_order() {
        let a = raw(liquidity(EventType::Deposit, "a", 3, ["1", "1"]));
        let b = raw(liquidity(EventType::Deposit, "b", 9, ["1", "1"]));
        let c = raw(liquidity(EventType::Deposit, "c", 1, ["1", "1"]));
        let merged = append_unique(vec![a.clone(), b.clone()], vec![c.clone(), a.clone()]);
        assert_eq!(merged, vec![a, b, c]);
    }

    #[test]
    fn appender_reports_what_it_kept() {
        let mut appender = UniqueAppender::new();
        let hop = raw(swap("s", 1, ["A", "B"], ["1", "-2"]));
        assert!(appender.push(hop.clone()));
        assert!(!appender.push(hop.clone()));
        assert_eq!(appender.extend(vec![hop]), 0);
        assert_eq!(appender.len(), 1);
        assert!(!appender.is_empty());
    }

    #[test]
    fn raw_and_history_keys_agree() {
        let hop = swap("s", 1, ["A", "B"], ["1", "-2"]);
        assert_eq!(DedupKey::of_raw(&hop), DedupKey::of(&raw(hop.clone())));
    }
}
