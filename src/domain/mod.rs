//! Domain layer: record types, feed storage, and notice broadcasting.
//!
//! Holds the raw and combined record shapes shared by the reconciliation
//! engine, the per-feed registry that owns accumulated histories, and the
//! event bus that announces history changes.

pub mod combined_swap;
pub mod event_bus;
pub mod feed_entry;
pub mod feed_id;
pub mod feed_registry;
pub mod history_event;
pub mod history_notice;
pub mod pool_event;
pub mod transaction_hash;

pub use combined_swap::{CombinedKind, CombinedSwapEvent};
pub use event_bus::EventBus;
pub use feed_entry::{FeedEntry, FeedSummary};
pub use feed_id::FeedId;
pub use feed_registry::FeedRegistry;
pub use history_event::HistoryEvent;
pub use history_notice::HistoryNotice;
pub use pool_event::{EventType, PoolEvent};
pub use transaction_hash::TransactionHash;
