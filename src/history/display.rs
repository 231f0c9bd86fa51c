//! Mapping of merged history entries into display rows.
//!
//! Token metadata and number formatting are collaborators behind the
//! [`TokenResolver`] and [`AmountFormatter`] traits; this module only
//! decides which token and amount goes into which column.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CombinedKind, CombinedSwapEvent, EventType, HistoryEvent, PoolEvent, TransactionHash,
};

use super::amount::{first_negative, first_positive};

/// Decimals assumed for tokens the resolver does not know.
pub const DEFAULT_DECIMALS: u32 = 7;

/// Display metadata of one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenInfo {
    /// Ticker shown to users (e.g. `USDC`).
    pub code: String,
    /// Decimal places shown for amounts of this token.
    pub decimals: u32,
}

/// Resolves token identifiers into display metadata.
pub trait TokenResolver: Send + Sync + fmt::Debug {
    /// Returns display metadata for `token_id`. Never fails: unknown
    /// tokens get a best-effort fallback.
    fn resolve(&self, token_id: &str) -> TokenInfo;
}

/// Formats decimal amount strings for display.
pub trait AmountFormatter: Send + Sync + fmt::Debug {
    /// Formats `value`, rounded to `round` decimal places when given.
    fn format(&self, value: &str, round: Option<u32>) -> String;
}

/// Errors loading a [`TokenDirectory`].
#[derive(Debug, thiserror::Error)]
pub enum TokenDirectoryError {
    /// The directory file could not be read.
    #[error("cannot read token directory: {0}")]
    Io(#[from] std::io::Error),
    /// The directory file is not a valid JSON map.
    #[error("invalid token directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static token directory keyed by token identifier.
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    tokens: HashMap<String, TokenInfo>,
}

impl TokenDirectory {
    /// Creates a directory from known tokens.
    #[must_use]
    pub fn new(tokens: HashMap<String, TokenInfo>) -> Self {
        Self { tokens }
    }

    /// Loads a directory from a JSON object `{ "<token_id>": { "code", "decimals" } }`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenDirectoryError`] if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, TokenDirectoryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parses a directory from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TokenDirectoryError::Parse`] on malformed JSON.
    pub fn from_json_str(raw: &str) -> Result<Self, TokenDirectoryError> {
        let tokens: HashMap<String, TokenInfo> = serde_json::from_str(raw)?;
        Ok(Self { tokens })
    }

    /// Number of known tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// `true` if no token is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenResolver for TokenDirectory {
    fn resolve(&self, token_id: &str) -> TokenInfo {
        match self.tokens.get(token_id) {
            Some(info) => info.clone(),
            None => TokenInfo {
                code: short_id(token_id),
                decimals: DEFAULT_DECIMALS,
            },
        }
    }
}

/// Shortens long identifiers to `head...tail`.
fn short_id(token_id: &str) -> String {
    let chars: Vec<char> = token_id.chars().collect();
    if chars.len() <= 12 {
        return token_id.to_string();
    }
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{head}...{tail}")
}

/// [`AmountFormatter`] backed by `rust_decimal`: rounds half-up to the
/// requested places and trims trailing zeros. Unparseable input is
/// returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalFormatter;

impl AmountFormatter for DecimalFormatter {
    fn format(&self, value: &str, round: Option<u32>) -> String {
        let Ok(mut decimal) = Decimal::from_str(value.trim()) else {
            return value.to_string();
        };
        if let Some(dp) = round {
            decimal = decimal.round_dp_with_strategy(
                dp,
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            );
        }
        decimal.normalize().to_string()
    }
}

/// Category of a display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Single- or multi-hop swap.
    Swap,
    /// Liquidity deposit.
    Deposit,
    /// Liquidity withdrawal.
    Withdraw,
    /// Reward claim.
    Claim,
    /// Incentive claim.
    ClaimIncentives,
    /// Unrecognized backend type.
    Other,
}

impl RowKind {
    fn of(event_type: &EventType) -> Self {
        match event_type {
            EventType::Swap => Self::Swap,
            EventType::Deposit => Self::Deposit,
            EventType::Withdraw => Self::Withdraw,
            EventType::Claim => Self::Claim,
            EventType::ClaimIncentives => Self::ClaimIncentives,
            EventType::Other(_) => Self::Other,
        }
    }
}

/// One token column of a row: code and absolute formatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RowLeg {
    /// Token code.
    pub code: String,
    /// Formatted absolute amount.
    pub amount: String,
}

/// Presentation-ready history row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryRow {
    /// Row category.
    pub kind: RowKind,
    /// Backend event type (`swap_combined` for assembled chains).
    pub event_type: String,
    /// Ledger sequence.
    pub ledger: u64,
    /// Parsed ledger close time, when it is RFC 3339.
    pub timestamp: Option<DateTime<Utc>>,
    /// Ledger close time as reported.
    pub ledger_close_at_str: String,
    /// Account address.
    pub account_address: String,
    /// Transaction hash.
    pub transaction_hash: TransactionHash,
    /// Token columns. Swaps: sent then received.
    pub legs: Vec<RowLeg>,
    /// Token codes from source to destination (swaps only).
    pub path: Vec<String>,
    /// Number of pool hops (swaps only, zero otherwise).
    pub hops: usize,
}

/// Builds display rows for `events`, in order.
#[must_use]
pub fn history_rows(
    events: &[HistoryEvent],
    resolver: &dyn TokenResolver,
    formatter: &dyn AmountFormatter,
) -> Vec<HistoryRow> {
    let ctx = RowContext {
        resolver,
        formatter,
    };
    events.iter().map(|event| ctx.row(event)).collect()
}

struct RowContext<'a> {
    resolver: &'a dyn TokenResolver,
    formatter: &'a dyn AmountFormatter,
}

impl RowContext<'_> {
    fn row(&self, event: &HistoryEvent) -> HistoryRow {
        match event {
            HistoryEvent::Combined(combined) => self.combined_row(combined),
            HistoryEvent::Raw(raw) if raw.is_swap() => self.swap_row(raw),
            HistoryEvent::Raw(raw) => self.pool_row(raw),
        }
    }

    fn leg(&self, token_id: &str, amount: &str) -> RowLeg {
        let info = self.resolver.resolve(token_id);
        RowLeg {
            amount: self.formatter.format(absolute(amount), Some(info.decimals)),
            code: info.code,
        }
    }

    fn codes<'s>(&self, tokens: impl IntoIterator<Item = &'s String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|token| self.resolver.resolve(token).code)
            .collect()
    }

    fn combined_row(&self, combined: &CombinedSwapEvent) -> HistoryRow {
        let legs = [
            combined.source().zip(combined.amount_sent()),
            combined.destination().zip(combined.amount_received()),
        ]
        .into_iter()
        .flatten()
        .map(|(token, amount)| self.leg(token, amount))
        .collect();
        HistoryRow {
            kind: RowKind::Swap,
            event_type: CombinedKind::AS_STR.to_string(),
            ledger: combined.ledger,
            timestamp: parse_close_time(&combined.ledger_close_at_str),
            ledger_close_at_str: combined.ledger_close_at_str.clone(),
            account_address: combined.account_address.clone(),
            transaction_hash: combined.transaction_hash.clone(),
            legs,
            path: self.codes(&combined.path),
            hops: combined.original_swaps.len(),
        }
    }

    fn swap_row(&self, raw: &PoolEvent) -> HistoryRow {
        let legs_idx = first_positive(&raw.amounts).zip(first_negative(&raw.amounts));
        let directed = legs_idx.and_then(|(pos, neg)| {
            Some((
                (raw.tokens.get(pos)?, raw.amounts.get(pos)?),
                (raw.tokens.get(neg)?, raw.amounts.get(neg)?),
            ))
        });
        let (legs, path) = match directed {
            Some(((from, sent), (to, received))) => (
                vec![self.leg(from, sent), self.leg(to, received)],
                self.codes([from, to]),
            ),
            None => (self.zipped_legs(&raw.tokens, &raw.amounts), Vec::new()),
        };
        HistoryRow {
            hops: 1,
            path,
            legs,
            ..self.base_row(raw)
        }
    }

    fn pool_row(&self, raw: &PoolEvent) -> HistoryRow {
        let tokens = if raw.pool_tokens.is_empty() {
            &raw.tokens
        } else {
            &raw.pool_tokens
        };
        HistoryRow {
            legs: self.zipped_legs(tokens, &raw.amounts),
            ..self.base_row(raw)
        }
    }

    fn zipped_legs(&self, tokens: &[String], amounts: &[String]) -> Vec<RowLeg> {
        tokens
            .iter()
            .zip(amounts)
            .map(|(token, amount)| self.leg(token, amount))
            .collect()
    }

    fn base_row(&self, raw: &PoolEvent) -> HistoryRow {
        HistoryRow {
            kind: RowKind::of(&raw.event_type),
            event_type: raw.event_type.as_str().to_string(),
            ledger: raw.ledger,
            timestamp: parse_close_time(&raw.ledger_close_at_str),
            ledger_close_at_str: raw.ledger_close_at_str.clone(),
            account_address: raw.account_address.clone(),
            transaction_hash: raw.transaction_hash.clone(),
            legs: Vec::new(),
            path: Vec::new(),
            hops: 0,
        }
    }
}

fn absolute(amount: &str) -> &str {
    let trimmed = amount.trim();
    trimmed.strip_prefix('-').unwrap_or(trimmed)
}

fn parse_close_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::history::build_chain;
    use crate::history::testing::{liquidity, swap};

    fn directory() -> TokenDirectory {
        let Ok(dir) = TokenDirectory::from_json_str(
            r#"{
                "XLM": { "code": "XLM", "decimals": 7 },
                "USDC": { "code": "USDC", "decimals": 2 },
                "AQUA": { "code": "AQUA", "decimals": 0 }
            }"#,
        ) else {
            panic!("directory should parse");
        };
        dir
    }

    #[test]
    fn formatter_rounds_and_trims() {
        let f = DecimalFormatter;
        assert_eq!(f.format("1.2300", None), "1.23");
        assert_eq!(f.format("1.235", Some(2)), "1.24");
        assert_eq!(f.format("1000.0000000", Some(7)), "1000");
        assert_eq!(f.format("n/a", Some(2)), "n/a");
    }

    #[test]
    fn unknown_tokens_fall_back_to_short_id() {
        let dir = directory();
        let info = dir.resolve("CAS3J7GYLGXMF6TDJBBYYSE3HQ6BBSMLNUQ34T6TZMYMW2EVH34XOWMA");
        assert_eq!(info.code, "CAS3...OWMA");
        assert_eq!(info.decimals, DEFAULT_DECIMALS);
        assert_eq!(dir.resolve("ABC").code, "ABC");
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn combined_swap_row_shows_sent_and_received() {
        let Some(chain) = build_chain(&[
            swap("abc", 10, ["XLM", "USDC"], ["100", "-50.555"]),
            swap("abc", 10, ["USDC", "AQUA"], ["50.555", "-1000.4"]),
        ]) else {
            panic!("chain expected");
        };
        let rows = history_rows(
            &[HistoryEvent::Combined(chain)],
            &directory(),
            &DecimalFormatter,
        );
        let row = &rows[0];
        assert_eq!(row.kind, RowKind::Swap);
        assert_eq!(row.event_type, "swap_combined");
        assert_eq!(row.hops, 2);
        assert_eq!(row.path, vec!["XLM", "USDC", "AQUA"]);
        assert_eq!(
            row.legs,
            vec![
                RowLeg {
                    code: "XLM".to_string(),
                    amount: "100".to_string()
                },
                RowLeg {
                    code: "AQUA".to_string(),
                    amount: "1000".to_string()
                },
            ]
        );
        assert!(row.timestamp.is_some());
    }

    #[test]
    fn raw_swap_row_orders_legs_by_direction() {
        let hop = swap("s", 3, ["USDC", "XLM"], ["-12.345", "100"]);
        let rows = history_rows(&[HistoryEvent::Raw(hop)], &directory(), &DecimalFormatter);
        let row = &rows[0];
        assert_eq!(row.hops, 1);
        assert_eq!(row.legs[0].code, "XLM");
        assert_eq!(row.legs[1].code, "USDC");
        assert_eq!(row.legs[1].amount, "12.35");
        assert_eq!(row.path, vec!["XLM", "USDC"]);
    }

    #[test]
    fn deposit_row_uses_pool_tokens() {
        let deposit = liquidity(EventType::Deposit, "d", 2, ["10.5", "20"]);
        let events = [HistoryEvent::Raw(deposit)];
        let rows = history_rows(&events, &directory(), &DecimalFormatter);
        let row = &rows[0];
        assert_eq!(row.kind, RowKind::Deposit);
        assert_eq!(row.hops, 0);
        assert!(row.path.is_empty());
        let codes: Vec<&str> = row.legs.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["XLM", "USDC"]);
    }

    #[test]
    fn unparseable_close_time_keeps_raw_string() {
        let mut claim = liquidity(EventType::Claim, "c", 2, ["0", "-1"]);
        claim.ledger_close_at_str = "yesterday".to_string();
        let rows = history_rows(&[HistoryEvent::Raw(claim)], &directory(), &DecimalFormatter);
        assert!(rows[0].timestamp.is_none());
        assert_eq!(rows[0].ledger_close_at_str, "yesterday");
    }
}
