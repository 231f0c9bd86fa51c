//! Processing of one freshly fetched page.

use std::collections::HashSet;

use crate::domain::{HistoryEvent, PoolEvent, TransactionHash};

use super::append::DedupKey;
use super::chain::build_chain;
use super::ordered::OrderedGroups;

/// Turns one page of raw records into history entries.
///
/// Swap hops are grouped by transaction; each transaction is emitted once,
/// at the position of its first hop: the raw hop when it is alone, the
/// combined chain when the hops combine, or every raw hop unchanged when
/// they do not. Non-swap records pass through untouched. The page may be
/// in any order.
///
/// The result is sorted by ledger descending. The sort is stable, so
/// entries on the same ledger keep the order in which they were emitted.
#[must_use]
pub fn process_batch(records: Vec<PoolEvent>) -> Vec<HistoryEvent> {
    let mut swaps: OrderedGroups<TransactionHash, PoolEvent> = records
        .iter()
        .filter(|record| record.is_swap())
        .map(|record| (record.transaction_hash.clone(), record.clone()))
        .collect();

    let mut emitted: HashSet<TransactionHash> = HashSet::with_capacity(swaps.len());
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if !record.is_swap() {
            out.push(HistoryEvent::Raw(record));
            continue;
        }
        if !emitted.insert(record.transaction_hash.clone()) {
            continue;
        }
        let group = swaps.take(&record.transaction_hash);
        emit_swap_group(group, &mut out);
    }

    sort_by_ledger_desc(&mut out);
    out
}

/// Hops repeated within the group are dropped first, so a hop listed twice
/// is still a single-hop swap.
fn emit_swap_group(group: Vec<PoolEvent>, out: &mut Vec<HistoryEvent>) {
    let mut seen = HashSet::with_capacity(group.len());
    let mut group: Vec<PoolEvent> = group
        .into_iter()
        .filter(|hop| seen.insert(DedupKey::of_raw(hop)))
        .collect();
    if group.len() == 1 {
        out.extend(group.pop().map(HistoryEvent::Raw));
        return;
    }
    match build_chain(&group) {
        Some(chain) => out.push(HistoryEvent::Combined(chain)),
        None => {
            tracing::debug!(hops = group.len(), "swap hops not combinable, emitting raw");
            out.extend(group.into_iter().map(HistoryEvent::Raw));
        }
    }
}

/// Stable sort, newest ledger first.
pub(crate) fn sort_by_ledger_desc(events: &mut [HistoryEvent]) {
    events.sort_by(|a, b| b.ledger().cmp(&a.ledger()));
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventType;
    use crate::history::testing::{liquidity, swap};

    #[test]
    fn single_hop_passes_through_raw() {
        let hop = swap("x", 5, ["XLM", "USDC"], ["100", "-50"]);
        let out = process_batch(vec![hop.clone()]);
        assert_eq!(out, vec![HistoryEvent::Raw(hop)]);
    }

    #[test]
    fn multi_hop_transaction_emits_one_combined_record() {
        let page = vec![
            swap("abc", 10, ["XLM", "USDC"], ["100", "-50"]),
            swap("abc", 10, ["USDC", "AQUA"], ["50", "-1000"]),
        ];
        let out = process_batch(page);
        assert_eq!(out.len(), 1);
        let Some(HistoryEvent::Combined(chain)) = out.first() else {
            panic!("expected combined record");
        };
        assert_eq!(chain.path, vec!["XLM", "USDC", "AQUA"]);
    }

    #[test]
    fn interleaved_records_keep_one_entry_per_transaction() {
        let page = vec![
            swap("a", 9, ["X", "Y"], ["1", "-2"]),
            liquidity(EventType::Deposit, "d", 9, ["5", "6"]),
            swap("b", 9, ["P", "Q"], ["1", "-2"]),
            swap("a", 9, ["Y", "Z"], ["2", "-3"]),
        ];
        let out = process_batch(page);
        let hashes: Vec<&str> = out.iter().map(|e| e.transaction_hash().as_str()).collect();
        assert_eq!(hashes, vec!["a", "d", "b"]);
        assert!(out.first().and_then(HistoryEvent::as_combined).is_some());
    }

    #[test]
    fn uncombinable_group_falls_back_to_raw_hops() {
        let page = vec![
            swap("bad", 3, ["A", "B"], ["1", "2"]),
            swap("bad", 3, ["B", "C"], ["2", "3"]),
        ];
        let out = process_batch(page.clone());
        let expected: Vec<HistoryEvent> = page.into_iter().map(HistoryEvent::Raw).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn output_is_sorted_newest_first() {
        let page = vec![
            liquidity(EventType::Withdraw, "w", 1, ["-1", "-1"]),
            swap("s", 3, ["A", "B"], ["1", "-2"]),
            liquidity(EventType::Claim, "c", 2, ["0", "-4"]),
        ];
        let out = process_batch(page);
        let ledgers: Vec<u64> = out.iter().map(HistoryEvent::ledger).collect();
        assert_eq!(ledgers, vec![3, 2, 1]);
    }

    #[test]
    fn equal_ledgers_keep_emission_order() {
        let page = vec![
            liquidity(EventType::Deposit, "first", 4, ["1", "1"]),
            liquidity(EventType::Deposit, "second", 4, ["1", "1"]),
        ];
        let out = process_batch(page);
        let hashes: Vec<&str> = out.iter().map(|e| e.transaction_hash().as_str()).collect();
        assert_eq!(hashes, vec!["first", "second"]);
    }

    #[test]
    fn repeated_hop_in_one_page_stays_raw() {
        let hop = swap("dup", 7, ["XLM", "USDC"], ["100", "-50"]);
        let out = process_batch(vec![hop.clone(), hop.clone()]);
        assert_eq!(out, vec![HistoryEvent::Raw(hop)]);
    }

    #[test]
    fn repeated_hop_does_not_inflate_chain() {
        let first = swap("abc", 10, ["XLM", "USDC"], ["100", "-50"]);
        let second = swap("abc", 10, ["USDC", "AQUA"], ["50", "-1000"]);
        let out = process_batch(vec![first.clone(), second, first]);
        let Some(HistoryEvent::Combined(chain)) = out.first() else {
            panic!("expected combined record");
        };
        assert_eq!(chain.original_swaps.len(), 2);
        assert_eq!(chain.path, vec!["XLM", "USDC", "AQUA"]);
    }

    #[test]
    fn empty_page_is_empty() {
        assert!(process_batch(Vec::new()).is_empty());
    }
}
