//! Pastelaria prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, CartState},
    catalog::{Catalog, CatalogError},
    checkout::{CheckoutError, Order, OrderReference, PaymentMethod, checkout},
    prices::{Price, PriceError, format_price, parse_price},
    pricing::{TotalPriceError, compute_total, line_total},
    products::{CatalogItem, Metadata, ProductId},
    receipt::{Receipt, ReceiptError},
    storefront::{CartView, CatalogView, Storefront, StorefrontError},
};
