//! # amm-history
//!
//! Swap-history reconciliation engine and gateway for AMM pool activity.
//!
//! Pool activity arrives as flat, paged lists of raw per-hop events. A
//! multi-hop swap shows up as several `swap` records sharing one
//! transaction hash, and its hops may straddle a page boundary. This crate
//! folds pages into per-feed histories where every multi-hop swap is one
//! combined swap chain, and serves them over HTTP and WebSocket.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── HistoryService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── FeedRegistry (domain/)
//!     └── Reconciliation engine (history/)
//! ```
//!
//! The engine in [`history`] is pure and synchronous and can be used on its
//! own:
//!
//! ```
//! use amm_history::domain::{EventType, HistoryEvent, PoolEvent};
//! use amm_history::history::{MergeOptions, merge};
//!
//! let hop = |tokens: [&str; 2], amounts: [&str; 2]| PoolEvent {
//!     event_type: EventType::Swap,
//!     ledger: 10,
//!     transaction_hash: "abc".into(),
//!     amounts: amounts.iter().map(|a| a.to_string()).collect(),
//!     tokens: tokens.iter().map(|t| t.to_string()).collect(),
//!     pool_tokens: Vec::new(),
//!     ledger_close_at_str: "2024-05-01T10:00:00Z".to_string(),
//!     account_address: "GUSER".to_string(),
//! };
//!
//! let options = MergeOptions::default();
//! let first = merge(vec![hop(["XLM", "USDC"], ["100", "-50"])], Vec::new(), &options);
//! let merged = merge(vec![hop(["USDC", "AQUA"], ["50", "-1000"])], first, &options);
//!
//! assert_eq!(merged.len(), 1);
//! assert!(matches!(merged.first(), Some(HistoryEvent::Combined(_))));
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod service;
pub mod ws;
