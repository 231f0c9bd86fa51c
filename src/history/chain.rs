//! Swap-chain assembly from the raw hops of one transaction.

use std::collections::HashMap;

use crate::domain::{CombinedKind, CombinedSwapEvent, PoolEvent};

use super::amount::{first_negative, first_positive};
use super::ordered::OrderedSet;

/// Amount reported when the chain has no recorded leg for an endpoint.
const MISSING_AMOUNT: &str = "0";

/// Extra steps the path walk may take beyond the hop count.
const PATH_WALK_SLACK: usize = 5;

/// Directed token flows extracted from a set of hops.
#[derive(Debug, Default)]
struct FlowGraph {
    /// First edge recorded per `from` token.
    edges: HashMap<String, String>,
    froms: OrderedSet<String>,
    tos: OrderedSet<String>,
    /// First outgoing amount per `from` token.
    sent: HashMap<String, String>,
    /// First incoming amount per `to` token.
    received: HashMap<String, String>,
}

impl FlowGraph {
    fn from_hops(hops: &[PoolEvent]) -> Self {
        let mut graph = Self::default();
        for hop in hops {
            let legs = first_positive(&hop.amounts).zip(first_negative(&hop.amounts));
            let Some((pos_idx, neg_idx)) = legs else {
                tracing::trace!(tx = %hop.transaction_hash, "skipping hop without both legs");
                continue;
            };
            let (Some(from), Some(to), Some(sent), Some(received)) = (
                hop.tokens.get(pos_idx),
                hop.tokens.get(neg_idx),
                hop.amounts.get(pos_idx),
                hop.amounts.get(neg_idx),
            ) else {
                tracing::trace!(tx = %hop.transaction_hash, "skipping hop with missing tokens");
                continue;
            };
            graph.add_edge(from, to, sent, received);
        }
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str, sent: &str, received: &str) {
        self.edges
            .entry(from.to_string())
            .or_insert_with(|| to.to_string());
        self.froms.insert(from.to_string());
        self.tos.insert(to.to_string());
        self.sent
            .entry(from.to_string())
            .or_insert_with(|| sent.to_string());
        self.received
            .entry(to.to_string())
            .or_insert_with(|| received.to_string());
    }

    /// The unique `from` token nothing flows into, else the first `from`.
    fn source(&self) -> Option<&String> {
        unique_or_first(&self.froms, &self.tos)
    }

    /// The unique `to` token that flows nowhere, else the first `to`.
    fn destination(&self) -> Option<&String> {
        unique_or_first(&self.tos, &self.froms)
    }

    /// Follows edges from `source` towards `destination`.
    ///
    /// Stops on arrival, on a missing edge, on a repeated node, or after
    /// `max_steps`. The returned path always starts at `source` and ends
    /// at `destination`.
    fn walk(&self, source: &str, destination: &str, max_steps: usize) -> Vec<String> {
        let mut path = vec![source.to_string()];
        let mut visited = OrderedSet::new();
        visited.insert(source.to_string());
        let mut current = source;
        for _ in 0..max_steps {
            if current == destination {
                break;
            }
            let Some(next) = self.edges.get(current) else {
                break;
            };
            if !visited.insert(next.clone()) {
                break;
            }
            path.push(next.clone());
            current = next;
        }
        if path.last().map(String::as_str) != Some(destination) {
            path.push(destination.to_string());
        }
        path
    }
}

fn unique_or_first<'a>(
    candidates: &'a OrderedSet<String>,
    excluded: &OrderedSet<String>,
) -> Option<&'a String> {
    let mut open = candidates.iter().filter(|token| !excluded.contains(token));
    match (open.next(), open.next()) {
        (Some(only), None) => Some(only),
        _ => candidates.first(),
    }
}

/// Combines the raw swap hops of one transaction into a single chain.
///
/// Returns `None` when there is nothing to combine: fewer than two hops,
/// or no hop carrying both a positive and a negative leg.
///
/// Callers must pass hops of a single transaction; this is not checked.
/// Ledger, close time, hash, account and pool tokens are copied from the
/// **last** element of `hops`, so callers order the hops so that the last
/// one is representative of the chain.
///
/// Source and destination are the endpoints nothing flows into and out
/// of. Cyclic or fan-in flows have no such unique endpoint; the first
/// token seen on the respective side is used instead.
#[must_use]
pub fn build_chain(hops: &[PoolEvent]) -> Option<CombinedSwapEvent> {
    let [.., last] = hops else {
        return None;
    };
    if hops.len() < 2 {
        return None;
    }

    let graph = FlowGraph::from_hops(hops);
    if graph.edges.is_empty() {
        tracing::debug!(tx = %last.transaction_hash, hops = hops.len(), "no usable swap legs");
        return None;
    }

    let source = graph.source()?;
    let destination = graph.destination()?;
    let amount_sent = graph
        .sent
        .get(source)
        .map_or(MISSING_AMOUNT, String::as_str);
    let amount_received = graph
        .received
        .get(destination)
        .map_or(MISSING_AMOUNT, String::as_str);
    let path = graph.walk(source, destination, hops.len() + PATH_WALK_SLACK);

    Some(CombinedSwapEvent {
        event_type: CombinedKind::SwapCombined,
        ledger: last.ledger,
        transaction_hash: last.transaction_hash.clone(),
        amounts: vec![amount_sent.to_string(), amount_received.to_string()],
        tokens: vec![source.clone(), destination.clone()],
        pool_tokens: last.pool_tokens.clone(),
        ledger_close_at_str: last.ledger_close_at_str.clone(),
        account_address: last.account_address.clone(),
        original_swaps: hops.to_vec(),
        path,
    })
}
