//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Merge behaviour of the reconciliation
//! engine is configured here too, so every feed uses the same policy.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::history::{MergeOptions, PageOrder, RescanPolicy};
use crate::service::PageLimits;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`HistoryConfig::from_env`].
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Which previously merged transactions each merge revisits.
    pub rescan: RescanPolicy,

    /// Direction of submitted pages.
    pub page_order: PageOrder,

    /// Reject pages whose ledgers break `page_order`.
    pub enforce_page_order: bool,

    /// Maximum records accepted in one page.
    pub max_page_size: usize,

    /// Capacity of the notice broadcast channel.
    pub event_bus_capacity: usize,

    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,

    /// Optional JSON token directory used for display rows.
    pub token_directory_path: Option<PathBuf>,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rescan: RescanPolicy::default(),
            page_order: PageOrder::default(),
            enforce_page_order: true,
            max_page_size: 500,
            event_bus_capacity: 10_000,
            request_timeout: Duration::from_secs(30),
            token_directory_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl HistoryConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR`, `MERGE_RESCAN` or `PAGE_ORDER`
    /// is set but cannot be parsed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };
        let rescan = match std::env::var("MERGE_RESCAN") {
            Ok(raw) => raw.parse::<RescanPolicy>()?,
            Err(_) => defaults.rescan,
        };
        let page_order = match std::env::var("PAGE_ORDER") {
            Ok(raw) => raw.parse::<PageOrder>()?,
            Err(_) => defaults.page_order,
        };

        let enforce_page_order = parse_env_bool("ENFORCE_PAGE_ORDER", defaults.enforce_page_order);
        let max_page_size = parse_env("MAX_PAGE_SIZE", defaults.max_page_size);
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity);
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));
        let token_directory_path = std::env::var("TOKEN_DIRECTORY_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            rescan,
            page_order,
            enforce_page_order,
            max_page_size,
            event_bus_capacity,
            request_timeout,
            token_directory_path,
            log_format,
        })
    }

    /// Merge options derived from this configuration.
    #[must_use]
    pub const fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            rescan: self.rescan,
            page_order: self.page_order,
        }
    }

    /// Page validation limits derived from this configuration.
    #[must_use]
    pub const fn page_limits(&self) -> PageLimits {
        PageLimits {
            max_page_size: self.max_page_size,
            enforce_order: self.enforce_page_order,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = HistoryConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.max_page_size, 500);
        assert!(config.enforce_page_order);
        assert_eq!(config.merge_options(), MergeOptions::default());
        assert_eq!(config.page_limits(), PageLimits::default());
    }

    #[test]
    fn missing_variables_fall_back() {
        assert_eq!(parse_env("AMM_HISTORY_TEST_UNSET_NUMBER", 7usize), 7);
        assert!(parse_env_bool("AMM_HISTORY_TEST_UNSET_BOOL", true));
    }
}
