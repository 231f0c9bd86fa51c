//! Page direction as delivered by the backend.
//!
//! The engine expects pages newest ledger first. Callers paging in the
//! other direction declare it through [`PageOrder`] instead of relying on
//! an unstated backend convention.

use serde::{Deserialize, Serialize};

use crate::domain::PoolEvent;

/// Direction in which records are ordered inside a fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOrder {
    /// Highest ledger first (the backend default).
    #[default]
    NewestFirst,
    /// Lowest ledger first.
    OldestFirst,
}

impl PageOrder {
    /// Returns the page reordered newest ledger first.
    #[must_use]
    pub fn normalize(self, mut records: Vec<PoolEvent>) -> Vec<PoolEvent> {
        if self == Self::OldestFirst {
            records.reverse();
        }
        records
    }

    /// Checks that ledgers are monotonic in this direction.
    ///
    /// # Errors
    ///
    /// Returns the first position where the ledger moves the wrong way.
    pub fn check(self, records: &[PoolEvent]) -> Result<(), PageOrderViolation> {
        let misplaced = records.windows(2).position(|pair| match pair {
            [prev, next] => match self {
                Self::NewestFirst => next.ledger > prev.ledger,
                Self::OldestFirst => next.ledger < prev.ledger,
            },
            _ => false,
        });
        match misplaced {
            None => Ok(()),
            Some(idx) => {
                let previous = records.get(idx).map_or(0, |r| r.ledger);
                let current = records.get(idx + 1).map_or(0, |r| r.ledger);
                Err(PageOrderViolation {
                    order: self,
                    position: idx + 1,
                    previous,
                    current,
                })
            }
        }
    }
}

impl std::str::FromStr for PageOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest_first" | "newest-first" | "desc" => Ok(Self::NewestFirst),
            "oldest_first" | "oldest-first" | "asc" => Ok(Self::OldestFirst),
            other => Err(format!("unknown page order: {other}")),
        }
    }
}

/// A record whose ledger breaks the declared page direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {position} has ledger {current} after ledger {previous}, violating {order:?}")]
pub struct PageOrderViolation {
    /// Declared direction.
    pub order: PageOrder,
    /// Index of the offending record.
    pub position: usize,
    /// Ledger of the record before it.
    pub previous: u64,
    /// Ledger of the offending record.
    pub current: u64,
}
