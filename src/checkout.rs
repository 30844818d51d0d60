//! Checkout
//!
//! Placing an order is local: the cart is priced, a four digit order reference is
//! drawn, and the cart is cleared. Nothing is sent anywhere and no payment is taken.

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{Cart, CartLine},
    prices::{Price, format_price},
    pricing::TotalPriceError,
};

/// Reasons an order cannot be placed.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty: add items to the cart before placing the order")]
    EmptyCart,

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] TotalPriceError),
}

/// How the customer says they will pay. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    Cash,

    /// Pix instant transfer
    Pix,

    /// Credit card
    CreditCard,
}

impl PaymentMethod {
    /// Label shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Pix => "Pix",
            Self::CreditCard => "Cartão de Crédito",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Synthetic order number shown on confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderReference(u16);

impl OrderReference {
    /// Smallest reference handed out.
    pub const MIN: u16 = 1000;

    /// Largest reference handed out.
    pub const MAX: u16 = 9999;

    /// Draw a reference uniformly from [`Self::MIN`]`..=`[`Self::MAX`].
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    /// The raw number.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A confirmed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    reference: OrderReference,
    payment_method: PaymentMethod,
    lines: Vec<CartLine>,
    total: Price,
}

impl Order {
    /// Order reference
    pub fn reference(&self) -> OrderReference {
        self.reference
    }

    /// Selected payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Lines as they were in the cart at checkout
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Amount due
    pub fn total(&self) -> Price {
        self.total
    }
}

/// Place an order for everything in `cart`, leaving it empty.
///
/// The cart is left untouched when checkout fails.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no lines.
/// - [`CheckoutError::Pricing`]: a line's price text does not parse or the total
///   overflows. No reference is drawn and the cart keeps its lines.
pub fn checkout<R: Rng>(
    cart: &mut Cart,
    payment_method: PaymentMethod,
    rng: &mut R,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        warn!("checkout rejected: cart is empty");

        return Err(CheckoutError::EmptyCart);
    }

    let total = cart.total()?;
    let reference = OrderReference::generate(rng);
    let lines = cart.clear();

    info!(
        %reference,
        total = %format_price(&total),
        lines = lines.len(),
        payment = %payment_method,
        "order placed"
    );

    Ok(Order {
        reference,
        payment_method,
        lines,
        total,
    })
}
