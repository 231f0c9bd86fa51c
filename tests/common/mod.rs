//! Shared helpers for integration tests: spawns a real server on an
//! ephemeral port and builds raw records.

#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use amm_history::api;
use amm_history::app_state::AppState;
use amm_history::domain::{EventBus, FeedRegistry};
use amm_history::history::{MergeOptions, TokenDirectory};
use amm_history::service::{HistoryService, PageLimits};
use serde_json::{Value, json};

const TOKENS: &str = r#"{
    "CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA": { "code": "XLM", "decimals": 7 },
    "CCW67TSZV3SSS2HXMBQ5JFGCKJNXKZM7UQUWUZPUTHXSTZLEO7SJMI75": { "code": "USDC", "decimals": 7 },
    "CAUIKL3IYGMERDRUN6YSCLWVAKIFG5Q4YJHUKM4S4NJZQIA3BAS6OJPK": { "code": "AQUA", "decimals": 7 }
}"#;

/// Contract id of the XLM token in [`TOKENS`].
pub const XLM: &str = "CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA";
/// Contract id of the USDC token in [`TOKENS`].
pub const USDC: &str = "CCW67TSZV3SSS2HXMBQ5JFGCKJNXKZM7UQUWUZPUTHXSTZLEO7SJMI75";
/// Contract id of the AQUA token in [`TOKENS`].
pub const AQUA: &str = "CAUIKL3IYGMERDRUN6YSCLWVAKIFG5Q4YJHUKM4S4NJZQIA3BAS6OJPK";

/// Starts the full application on `127.0.0.1:0` and returns its address.
pub async fn spawn_server() -> SocketAddr {
    let Ok(directory) = TokenDirectory::from_json_str(TOKENS) else {
        panic!("token fixture should parse");
    };
    let service = HistoryService::new(
        Arc::new(FeedRegistry::new()),
        EventBus::new(64),
        MergeOptions::default(),
        PageLimits {
            max_page_size: 10,
            enforce_order: true,
        },
    )
    .with_token_resolver(Arc::new(directory));
    let app = api::build_app(AppState::new(Arc::new(service)), Duration::from_secs(5));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Builds one raw swap hop as JSON.
pub fn swap(tx: &str, ledger: u64, tokens: [&str; 2], amounts: [&str; 2]) -> Value {
    json!({
        "event_type": "swap",
        "ledger": ledger,
        "transaction_hash": tx,
        "amounts": amounts,
        "tokens": tokens,
        "ledger_close_at_str": "2024-05-01T10:00:00Z",
        "account_address": "GUSER",
    })
}

/// Builds one raw deposit as JSON.
pub fn deposit(tx: &str, ledger: u64, amounts: [&str; 2]) -> Value {
    json!({
        "event_type": "deposit",
        "ledger": ledger,
        "transaction_hash": tx,
        "amounts": amounts,
        "pool_tokens": [XLM, USDC],
        "ledger_close_at_str": "2024-05-01T09:00:00Z",
        "account_address": "GUSER",
    })
}
