//! Storefront
//!
//! A storefront session owns the menu and the cart. Screens never hold the cart
//! directly; they borrow a view, and because both views need `&mut self` only one of
//! them can be writing at a time.

use rand::Rng;
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine, CartState},
    catalog::{Catalog, CatalogError},
    checkout::{CheckoutError, Order, PaymentMethod, checkout},
    prices::Price,
    pricing::TotalPriceError,
    products::{CatalogItem, ProductId},
};

/// Errors raised by storefront views.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The requested product is not on the menu.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One customer session.
#[derive(Debug, Default)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
}

impl Storefront {
    /// Start a session with an empty cart.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
        }
    }

    /// The menu.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Handle for the menu screen.
    pub fn catalog_view(&mut self) -> CatalogView<'_> {
        CatalogView {
            catalog: &self.catalog,
            cart: &mut self.cart,
        }
    }

    /// Handle for the cart screen.
    pub fn cart_view(&mut self) -> CartView<'_> {
        CartView {
            cart: &mut self.cart,
        }
    }
}

/// Menu screen: lists products and adds them to the cart.
#[derive(Debug)]
pub struct CatalogView<'s> {
    catalog: &'s Catalog,
    cart: &'s mut Cart,
}

impl CatalogView<'_> {
    /// Products in menu order.
    pub fn products(&self) -> impl Iterator<Item = &CatalogItem> {
        self.catalog.products()
    }

    /// Add one unit of product `id`, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not on the menu.
    pub fn add(&mut self, id: ProductId) -> Result<u32, StorefrontError> {
        let item = self.catalog.product(id)?;

        Ok(self.cart.add_to_cart(item))
    }
}

/// Cart screen: lists, adjusts and checks out the cart.
#[derive(Debug)]
pub struct CartView<'s> {
    cart: &'s mut Cart,
}

impl CartView<'_> {
    /// Lines in the cart.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Whether there is anything to check out.
    pub fn state(&self) -> CartState {
        self.cart.state()
    }

    /// Running total.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line cannot be priced.
    pub fn total(&self) -> Result<Price, TotalPriceError> {
        self.cart.total()
    }

    /// Stepper "plus" button.
    pub fn increment(&mut self, id: ProductId) -> Option<u32> {
        let quantity = self.cart.line(id)?.quantity();

        self.cart.update_quantity(id, i64::from(quantity) + 1)
    }

    /// Stepper "minus" button. Stops at one; use [`CartView::remove`] to drop a line.
    pub fn decrement(&mut self, id: ProductId) -> Option<u32> {
        let quantity = self.cart.line(id)?.quantity();

        self.cart.update_quantity(id, i64::from(quantity) - 1)
    }

    /// Trash button, after the customer confirmed.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLine> {
        self.cart.remove_from_cart(id)
    }

    /// Place the order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is empty or cannot be priced.
    pub fn checkout<R: Rng>(
        &mut self,
        payment_method: PaymentMethod,
        rng: &mut R,
    ) -> Result<Order, CheckoutError> {
        checkout(self.cart, payment_method, rng)
    }
}
