//! Swap-history reconciliation engine.
//!
//! Pure, synchronous transformations from raw per-hop pool events into
//! merged histories where every multi-hop swap is one swap chain:
//!
//! ```text
//! page of PoolEvent ──► process_batch ──► merge(…, previous) ──► Vec<HistoryEvent>
//!                           │                   │
//!                       build_chain        append_unique
//! ```
//!
//! Nothing here performs I/O or keeps state between calls; the caller owns
//! the accumulated history and passes it back on the next merge.

pub mod amount;
pub mod append;
pub mod batch;
pub mod chain;
pub mod display;
pub mod merge;
pub mod ordered;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use append::{DedupKey, UniqueAppender, append_unique};
pub use batch::process_batch;
pub use chain::build_chain;
pub use display::{
    AmountFormatter, DecimalFormatter, HistoryRow, RowKind, RowLeg, TokenDirectory,
    TokenDirectoryError, TokenInfo, TokenResolver, history_rows,
};
pub use merge::{MergeOptions, RescanPolicy, merge};
pub use page::{PageOrder, PageOrderViolation};
