//! Cart
//!
//! The cart is the only mutable state of a storefront session. It holds at most one
//! line per product, keeps lines in the order they were first added, and never lets a
//! quantity drop below one.

use std::mem;

use tracing::{debug, trace};

use crate::{
    prices::Price,
    pricing::{TotalPriceError, compute_total},
    products::{CatalogItem, Metadata, ProductId},
};

/// One product in the cart together with how many of it were ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    id: ProductId,
    name: String,
    unit_price_text: String,
    quantity: u32,
    metadata: Metadata,
}

impl CartLine {
    /// Product identifier
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Display name copied from the catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price text copied from the catalog
    pub fn unit_price_text(&self) -> &str {
        &self.unit_price_text
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Pass-through catalog fields
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl From<&CatalogItem> for CartLine {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            unit_price_text: item.price.clone(),
            quantity: 1,
            metadata: item.metadata(),
        }
    }
}

/// Whether the cart holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// No lines
    Empty,

    /// At least one line
    HasItems,
}

/// In-memory shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`.
    ///
    /// A product already in the cart has its quantity bumped; otherwise a new line with
    /// quantity one is appended. Returns the line's quantity after the change.
    pub fn add_to_cart(&mut self, item: &CatalogItem) -> u32 {
        let before = self.state();

        let quantity = if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine::from(item));
            1
        };

        debug!(product = %item.id, quantity, "added item to cart");

        self.trace_transition(before);

        quantity
    }

    /// Remove the line for `id`, returning it. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartLine> {
        let before = self.state();

        let position = self.lines.iter().position(|line| line.id == id)?;
        let removed = self.lines.remove(position);

        debug!(product = %id, "removed item from cart");

        self.trace_transition(before);

        Some(removed)
    }

    /// Set the quantity for `id`, clamping anything below one up to one.
    ///
    /// Unknown ids are ignored. Reaching zero is the caller's job, via
    /// [`Cart::remove_from_cart`].
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Option<u32> {
        let Some(line) = self.line_mut(id) else {
            trace!(product = %id, "quantity update for product not in cart");
            return None;
        };

        line.quantity = clamp_quantity(quantity);

        debug!(product = %id, requested = quantity, quantity = line.quantity, "updated quantity");

        Some(line.quantity)
    }

    /// Remove every line, returning them in cart order.
    pub fn clear(&mut self) -> Vec<CartLine> {
        let before = self.state();
        let lines = mem::take(&mut self.lines);

        debug!(lines = lines.len(), "cleared cart");

        self.trace_transition(before);

        lines
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `id`, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Current macro-state.
    pub fn state(&self) -> CartState {
        if self.is_empty() {
            CartState::Empty
        } else {
            CartState::HasItems
        }
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line's price text cannot be parsed or the sum
    /// overflows.
    pub fn total(&self) -> Result<Price, TotalPriceError> {
        compute_total(&self.lines)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    fn trace_transition(&self, before: CartState) {
        let after = self.state();

        if before != after {
            trace!(?before, ?after, "cart state changed");
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
