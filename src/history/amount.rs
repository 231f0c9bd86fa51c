//! Sign classification of pool-perspective decimal amounts.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Sign of a decimal amount string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSign {
    /// Strictly positive: the pool received it, the user sent it.
    Positive,
    /// Strictly negative: the pool paid it out, the user received it.
    Negative,
    /// Zero.
    Zero,
}

/// Classifies the sign of a decimal string.
///
/// Values outside `Decimal`'s range fall back to a lexical check, so very
/// long integer amounts still classify. Returns `None` for strings that
/// are not decimal numbers.
#[must_use]
pub fn amount_sign(value: &str) -> Option<AmountSign> {
    let trimmed = value.trim();
    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(decimal) if decimal.is_zero() => Some(AmountSign::Zero),
        Ok(decimal) if decimal.is_sign_negative() => Some(AmountSign::Negative),
        Ok(_) => Some(AmountSign::Positive),
        Err(_) => lexical_sign(trimmed),
    }
}

fn lexical_sign(value: &str) -> Option<AmountSign> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || digits.chars().filter(|c| *c == '.').count() > 1 {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if !digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        return Some(AmountSign::Zero);
    }
    Some(if negative {
        AmountSign::Negative
    } else {
        AmountSign::Positive
    })
}

/// Index of the first strictly positive amount.
#[must_use]
pub fn first_positive(amounts: &[String]) -> Option<usize> {
    amounts
        .iter()
        .position(|a| amount_sign(a) == Some(AmountSign::Positive))
}

/// Index of the first strictly negative amount.
#[must_use]
pub fn first_negative(amounts: &[String]) -> Option<usize> {
    amounts
        .iter()
        .position(|a| amount_sign(a) == Some(AmountSign::Negative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_decimals() {
        assert_eq!(amount_sign("100"), Some(AmountSign::Positive));
        assert_eq!(amount_sign("-0.0000001"), Some(AmountSign::Negative));
        assert_eq!(amount_sign("0"), Some(AmountSign::Zero));
        assert_eq!(amount_sign("-0.00"), Some(AmountSign::Zero));
        assert_eq!(amount_sign(" 12.5 "), Some(AmountSign::Positive));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(amount_sign(""), None);
        assert_eq!(amount_sign("abc"), None);
        assert_eq!(amount_sign("1.2.3"), None);
        assert_eq!(amount_sign("-"), None);
    }

    #[test]
    fn huge_values_fall_back_to_lexical() {
        let huge = "123456789012345678901234567890123456789";
        assert_eq!(amount_sign(huge), Some(AmountSign::Positive));
        assert_eq!(amount_sign(&format!("-{huge}")), Some(AmountSign::Negative));
    }

    #[test]
    fn finds_first_legs() {
        let amounts = vec!["0".to_string(), "-5".to_string(), "7".to_string()];
        assert_eq!(first_positive(&amounts), Some(2));
        assert_eq!(first_negative(&amounts), Some(1));
        assert_eq!(first_negative(&["1".to_string()]), None);
    }
}
