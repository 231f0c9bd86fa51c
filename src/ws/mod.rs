//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` pushes [`crate::domain::HistoryNotice`]s
//! to clients subscribed to the affected feeds.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
