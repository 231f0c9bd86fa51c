//! Incremental merging of a new page into previously merged history.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{HistoryEvent, PoolEvent, TransactionHash};

use super::append::{DedupKey, UniqueAppender};
use super::batch::{process_batch, sort_by_ledger_desc};
use super::chain::build_chain;
use super::ordered::OrderedGroups;
use super::page::PageOrder;

/// Which previously merged transactions a merge revisits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescanPolicy {
    /// Rebuild every transaction of the history on every merge.
    Full,
    /// Rebuild only transactions present in the new page, plus those still
    /// represented by a raw swap hop. Everything else is carried over as is.
    #[default]
    TouchedOnly,
}

impl FromStr for RescanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "touched" | "touched_only" | "touched-only" => Ok(Self::TouchedOnly),
            other => Err(format!("unknown rescan policy: {other}")),
        }
    }
}

/// Knobs of [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Which previous transactions are rebuilt.
    pub rescan: RescanPolicy,
    /// Direction of the incoming page.
    pub page_order: PageOrder,
}

/// Folds one newly fetched page into the previously merged history.
///
/// `previous` must be the exact return value of the prior call for the
/// same feed (or empty for the first page); calls form a sequential left
/// fold over pages and must not run concurrently against the same base.
///
/// Transactions are reconciled as a whole: raw hops on either side and
/// the hops unpacked from combined records are gathered and the chain is
/// rebuilt, so a multi-hop swap split across a page boundary comes out as
/// one combined record. Non-swap records are merged without structural
/// duplicates. The result is sorted by ledger descending (stable).
#[must_use]
pub fn merge(
    new_records: Vec<PoolEvent>,
    previous: Vec<HistoryEvent>,
    options: &MergeOptions,
) -> Vec<HistoryEvent> {
    let processed = process_batch(options.page_order.normalize(new_records));
    if previous.is_empty() {
        return processed;
    }

    let capacity = previous.len() + processed.len();
    let mut before_groups = group_by_transaction(previous);
    let mut fresh_groups = group_by_transaction(processed);
    let hashes: Vec<TransactionHash> = before_groups
        .keys()
        .chain(
            fresh_groups
                .keys()
                .filter(|hash| !before_groups.contains_key(hash)),
        )
        .cloned()
        .collect();

    let mut merged = UniqueAppender::with_capacity(capacity);
    let mut rebuilt = 0usize;
    for hash in &hashes {
        let before = before_groups.take(hash);
        let fresh = fresh_groups.take(hash);
        let untouched = fresh.is_empty() && !before.iter().any(HistoryEvent::is_raw_swap);
        if options.rescan == RescanPolicy::TouchedOnly && untouched {
            merged.extend(before);
            continue;
        }
        rebuilt += 1;
        reconcile_transaction(before, fresh, &mut merged);
    }

    tracing::debug!(
        transactions = hashes.len(),
        rebuilt,
        entries = merged.len(),
        "merged page into history"
    );

    let mut out = merged.into_events();
    sort_by_ledger_desc(&mut out);
    out
}

fn group_by_transaction(events: Vec<HistoryEvent>) -> OrderedGroups<TransactionHash, HistoryEvent> {
    events
        .into_iter()
        .map(|event| (event.transaction_hash().clone(), event))
        .collect()
}

/// Rebuilds one transaction from both sides of the merge.
fn reconcile_transaction(
    before: Vec<HistoryEvent>,
    fresh: Vec<HistoryEvent>,
    merged: &mut UniqueAppender,
) {
    let all: Vec<HistoryEvent> = before.into_iter().chain(fresh).collect();
    if !all.iter().any(HistoryEvent::is_swap_related) {
        merged.extend(all);
        return;
    }

    let hops = collect_raw_hops(&all);
    let Some(chain) = build_chain(&hops) else {
        merged.extend(all);
        return;
    };
    merged.push(HistoryEvent::Combined(chain));
    // Non-swap records sharing the transaction survive next to the chain.
    merged.extend(all.into_iter().filter(|event| !event.is_swap_related()));
}

/// Raw hops of a transaction: raw swaps plus the hops inside combined
/// records, in order of appearance, without structural duplicates.
fn collect_raw_hops(events: &[HistoryEvent]) -> Vec<PoolEvent> {
    let mut seen = HashSet::new();
    let mut hops = Vec::new();
    for event in events {
        let raw: &[PoolEvent] = match event {
            HistoryEvent::Combined(combined) => &combined.original_swaps,
            HistoryEvent::Raw(raw) if raw.is_swap() => std::slice::from_ref(raw),
            HistoryEvent::Raw(_) => &[],
        };
        for hop in raw {
            if seen.insert(DedupKey::of_raw(hop)) {
                hops.push(hop.clone());
            }
        }
    }
    hops
}
