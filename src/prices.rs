//! Prices
//!
//! Catalog prices are carried as display text such as `"R$ 16,00"`. This module is the
//! single place where that text is turned into [`Money`] and back again.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BRL, Currency},
};
use thiserror::Error;

/// Prefix printed before every amount.
pub const CURRENCY_PREFIX: &str = "R$";

/// Maximum number of decimal places accepted in price text.
const MAX_SCALE: u32 = 2;

/// A price in Brazilian reais.
pub type Price = Money<'static, Currency>;

/// Errors produced while parsing price text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing left after stripping whitespace and the currency prefix.
    #[error("price is empty")]
    Empty,

    /// The amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(String),

    /// The amount has more than two decimal places.
    #[error("price has more than two decimal places: {0}")]
    TooPrecise(String),

    /// The amount does not fit in minor units.
    #[error("price is too large: {0}")]
    Overflow(String),
}

/// Build a price from a number of centavos.
pub fn from_centavos(minor_units: i64) -> Price {
    Money::from_minor(minor_units, BRL)
}

/// Zero reais.
pub fn zero() -> Price {
    from_centavos(0)
}

/// Parse price text (e.g. `"R$ 16,00"`) into a [`Price`].
///
/// Accepted format: optional `R$` prefix, then an amount. When the amount contains a
/// comma, the comma is the decimal separator and dots may group thousands in the
/// whole part (`"R$ 1.234,56"`). Without a comma, a dot is the decimal separator
/// (`"16.5"`). Misplaced grouping dots (`"1.6,00"`, `"1,6.0"`) are rejected.
///
/// # Errors
///
/// Returns a [`PriceError`] if the text is empty, is not a plain decimal number, is
/// negative, has more than two decimal places, or overflows minor units.
pub fn parse_price(text: &str) -> Result<Price, PriceError> {
    let trimmed = text.trim();
    let amount = trimmed
        .strip_prefix(CURRENCY_PREFIX)
        .unwrap_or(trimmed)
        .trim();

    if amount.is_empty() {
        return Err(PriceError::Empty);
    }

    if amount.starts_with('-') {
        return Err(PriceError::Negative(text.to_string()));
    }

    let normalized = match amount.split_once(',') {
        Some((whole, fraction)) if !fraction.contains('.') => {
            ungroup(whole).map(|whole| format!("{whole}.{fraction}"))
        }
        Some(_) => None,
        None => Some(amount.to_string()),
    };

    let Some(normalized) = normalized.filter(|n| is_plain_decimal(n)) else {
        return Err(PriceError::InvalidAmount(text.to_string()));
    };

    let value = normalized
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(text.to_string()))?;

    if value.scale() > MAX_SCALE {
        return Err(PriceError::TooPrecise(text.to_string()));
    }

    let minor_units = value
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| PriceError::Overflow(text.to_string()))?;

    Ok(from_centavos(minor_units))
}

/// Format a price the way the menu prints it, e.g. `R$ 1.234,56`.
pub fn format_price(price: &Price) -> String {
    let minor_units = price.to_minor_units();
    let sign = if minor_units < 0 { "-" } else { "" };

    let absolute = minor_units.unsigned_abs();
    let digits = (absolute / 100).to_string();
    let cents = absolute % 100;

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(digit);
    }

    format!("{sign}{CURRENCY_PREFIX} {grouped},{cents:02}")
}

/// Strip thousands separators from the whole part of a comma-decimal amount.
///
/// Either no dots at all, or a leading group of one to three digits followed by
/// groups of exactly three (`1.234.567`).
fn ungroup(whole: &str) -> Option<String> {
    if !whole.contains('.') {
        return Some(whole.to_string());
    }

    let mut groups = whole.split('.');
    let leading = groups.next().unwrap_or_default();

    if !(1..=3).contains(&leading.len()) {
        return None;
    }

    let mut digits = leading.to_string();

    for group in groups {
        if group.len() != 3 {
            return None;
        }

        digits.push_str(group);
    }

    Some(digits)
}

/// Digits with at most one inner dot.
fn is_plain_decimal(s: &str) -> bool {
    let mut parts = s.split('.');

    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();

    if parts.next().is_some() || whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    fraction.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_accepts_menu_format() -> TestResult {
        assert_eq!(parse_price("R$ 16,00")?, from_centavos(1600));
        assert_eq!(parse_price("R$ 8,50")?, from_centavos(850));

        Ok(())
    }

    #[test]
    fn parse_price_accepts_missing_prefix_and_padding() -> TestResult {
        assert_eq!(parse_price("16,00")?, from_centavos(1600));
        assert_eq!(parse_price("  R$16,00 ")?, from_centavos(1600));

        Ok(())
    }

    #[test]
    fn parse_price_strips_thousand_separators() -> TestResult {
        assert_eq!(parse_price("R$ 1.234,56")?, from_centavos(123_456));

        Ok(())
    }

    #[test]
    fn parse_price_accepts_dot_decimal_without_comma() -> TestResult {
        assert_eq!(parse_price("16.5")?, from_centavos(1650));
        assert_eq!(parse_price("7")?, from_centavos(700));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_empty_text() {
        assert_eq!(parse_price(""), Err(PriceError::Empty));
        assert_eq!(parse_price("R$ "), Err(PriceError::Empty));
    }

    #[test]
    fn parse_price_rejects_non_numeric_amounts() {
        assert!(matches!(
            parse_price("R$ abc"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_price("R$ 1,2,3"),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_price("R$ 16,"),
            Err(PriceError::InvalidAmount(_))
        ));

        for misplaced in ["R$ 1.6,00", "R$ .16,00", "R$ 1,6.0", "R$ 16.,00", "R$ 1234.567,00"] {
            assert!(
                matches!(parse_price(misplaced), Err(PriceError::InvalidAmount(_))),
                "{misplaced} should be rejected"
            );
        }
    }

    #[test]
    fn parse_price_accepts_well_formed_grouping() -> TestResult {
        assert_eq!(parse_price("R$ 1.000.000,00")?, from_centavos(100_000_000));
        assert_eq!(parse_price("R$ 12.345,6")?, from_centavos(1_234_560));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        assert!(matches!(
            parse_price("R$ -1,00"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn parse_price_rejects_sub_centavo_precision() {
        assert!(matches!(
            parse_price("R$ 1,234"),
            Err(PriceError::TooPrecise(_))
        ));
    }

    #[test]
    fn format_price_uses_comma_decimals_and_dot_grouping() {
        assert_eq!(format_price(&from_centavos(1600)), "R$ 16,00");
        assert_eq!(format_price(&from_centavos(5)), "R$ 0,05");
        assert_eq!(format_price(&from_centavos(123_456)), "R$ 1.234,56");
        assert_eq!(format_price(&from_centavos(100_000_000)), "R$ 1.000.000,00");
        assert_eq!(format_price(&from_centavos(-250)), "-R$ 2,50");
    }

    #[test]
    fn formatted_prices_parse_back() -> TestResult {
        let price = from_centavos(98_765);

        assert_eq!(parse_price(&format_price(&price))?, price);

        Ok(())
    }
}
