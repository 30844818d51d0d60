//! Pastelaria
//!
//! Cart engine for a pastry shop storefront: a static menu, an in-memory cart that
//! merges repeated products and never lets a quantity fall below one, BRL price
//! parsing, and a local checkout that hands back a synthetic order reference.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storefront;
