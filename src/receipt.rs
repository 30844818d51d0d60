//! Receipt

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    checkout::{Order, OrderReference, PaymentMethod},
    prices::{Price, format_price},
    pricing::{TotalPriceError, line_total},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error pricing an order line.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One printed row.
#[derive(Debug, Clone, PartialEq)]
struct ReceiptRow {
    name: String,
    quantity: u32,
    unit_price: String,
    subtotal: Price,
}

/// Printable confirmation for a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    rows: Vec<ReceiptRow>,
    total: Price,
    payment_method: PaymentMethod,
    reference: OrderReference,
}

impl Receipt {
    /// Build a receipt for `order`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::TotalPrice`] if a line cannot be priced.
    pub fn from_order(order: &Order) -> Result<Self, ReceiptError> {
        let rows = order
            .lines()
            .iter()
            .map(|line| {
                let subtotal = line_total(line)?;

                Ok(ReceiptRow {
                    name: line.name().to_string(),
                    quantity: line.quantity(),
                    unit_price: line.unit_price_text().to_string(),
                    subtotal,
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        Ok(Self {
            rows,
            total: order.total(),
            payment_method: order.payment_method(),
            reference: order.reference(),
        })
    }

    /// Amount due
    pub fn total(&self) -> Price {
        self.total
    }

    /// Order reference
    pub fn reference(&self) -> OrderReference {
        self.reference
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Subtotal"]);

        for row in &self.rows {
            builder.push_record([
                row.name.clone(),
                row.quantity.to_string(),
                row.unit_price.clone(),
                format_price(&row.subtotal),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        let total = format_price(&self.total);
        let payment = self.payment_method.label();
        let reference = self.reference.to_string();

        let summary = [
            ("Total:", total.as_str()),
            ("Payment:", payment),
            ("Order:", reference.as_str()),
        ];

        let label_width = summary
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();

        for (label, value) in summary {
            writeln!(out, " {label:>label_width$}  {value}").map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}
