//! Record builders shared by the engine's unit tests.

use crate::domain::{EventType, PoolEvent, TransactionHash};

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Raw swap hop.
pub(crate) fn swap<const N: usize>(
    tx: &str,
    ledger: u64,
    tokens: [&str; N],
    amounts: [&str; N],
) -> PoolEvent {
    PoolEvent {
        event_type: EventType::Swap,
        ledger,
        transaction_hash: TransactionHash::from(tx),
        amounts: strings(amounts),
        tokens: strings(tokens),
        pool_tokens: Vec::new(),
        ledger_close_at_str: format!("2024-05-01T10:00:{:02}Z", ledger % 60),
        account_address: "GUSER".to_string(),
    }
}

/// Raw non-swap record over a two-token pool.
pub(crate) fn liquidity(
    event_type: EventType,
    tx: &str,
    ledger: u64,
    amounts: [&str; 2],
) -> PoolEvent {
    PoolEvent {
        event_type,
        ledger,
        transaction_hash: TransactionHash::from(tx),
        amounts: strings(amounts),
        tokens: Vec::new(),
        pool_tokens: strings(["XLM", "USDC"]),
        ledger_close_at_str: format!("2024-05-01T10:00:{:02}Z", ledger % 60),
        account_address: "GUSER".to_string(),
    }
}
