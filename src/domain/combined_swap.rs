//! Synthesized records summarizing a whole swap chain.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PoolEvent, TransactionHash};

/// Discriminator carried by every combined record (`"swap_combined"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CombinedKind {
    /// The only combined kind.
    #[default]
    #[serde(rename = "swap_combined")]
    SwapCombined,
}

impl CombinedKind {
    /// Wire string of the discriminator.
    pub const AS_STR: &'static str = "swap_combined";
}

/// One logical multi-hop swap assembled from its raw hops.
///
/// Never produced by the backend. Metadata (`ledger`, close time, hash,
/// account, pool tokens) is taken from the last hop the chain was built
/// from; `tokens` and `amounts` hold `[source, destination]` and
/// `[sent, received]`. The raw hops are kept in `original_swaps` so a later
/// merge can rebuild the chain when more hops of the same transaction
/// arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CombinedSwapEvent {
    /// Always `swap_combined`.
    pub event_type: CombinedKind,
    /// Ledger of the last hop.
    pub ledger: u64,
    /// Shared transaction hash.
    pub transaction_hash: TransactionHash,
    /// `[amount_user_sent, amount_user_received]` as recorded on the hops.
    pub amounts: Vec<String>,
    /// `[source_token, destination_token]`.
    pub tokens: Vec<String>,
    /// Pool tokens of the last hop, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pool_tokens: Vec<String>,
    /// Ledger close time of the last hop.
    pub ledger_close_at_str: String,
    /// Account of the last hop.
    pub account_address: String,
    /// Raw hops this record was built from. Never contains combined records.
    pub original_swaps: Vec<PoolEvent>,
    /// Token identifiers from source to destination, inclusive.
    pub path: Vec<String>,
}

impl CombinedSwapEvent {
    /// Source token of the chain.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Destination token of the chain.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.tokens.get(1).map(String::as_str)
    }

    /// Amount the user sent, in the source token.
    #[must_use]
    pub fn amount_sent(&self) -> Option<&str> {
        self.amounts.first().map(String::as_str)
    }

    /// Amount the user received, in the destination token (pool-signed).
    #[must_use]
    pub fn amount_received(&self) -> Option<&str> {
        self.amounts.get(1).map(String::as_str)
    }
}
