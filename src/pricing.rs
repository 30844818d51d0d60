//! Pricing

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    cart::CartLine,
    prices::{Price, PriceError, from_centavos, parse_price, zero},
    products::ProductId,
};

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line's unit price text could not be parsed.
    #[error("product {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending product
        id: ProductId,

        /// Parse failure
        #[source]
        source: PriceError,
    },

    /// Unit price times quantity does not fit in minor units.
    #[error("line total for product {0} overflowed")]
    Overflow(ProductId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Unit price times quantity for a single line.
///
/// # Errors
///
/// - [`TotalPriceError::InvalidPrice`]: the unit price text is malformed.
/// - [`TotalPriceError::Overflow`]: the product does not fit in minor units.
pub fn line_total(line: &CartLine) -> Result<Price, TotalPriceError> {
    let id = line.id();

    let unit_price = parse_price(line.unit_price_text())
        .map_err(|source| TotalPriceError::InvalidPrice { id, source })?;

    let minor_units = unit_price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(TotalPriceError::Overflow(id))?;

    Ok(from_centavos(minor_units))
}

/// Calculates the total price of a list of cart lines. No lines cost zero.
///
/// # Errors
///
/// - [`TotalPriceError::InvalidPrice`]: a unit price text is malformed.
/// - [`TotalPriceError::Overflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic error.
pub fn compute_total<'a>(
    lines: impl IntoIterator<Item = &'a CartLine>,
) -> Result<Price, TotalPriceError> {
    lines.into_iter().try_fold(zero(), |acc, line| {
        let subtotal = line_total(line)?;

        Ok(acc.add(subtotal)?)
    })
}
