//! Pastelaria command line storefront.
//!
//! `pastelaria menu` prints the menu. `pastelaria order -a 1 -a 1 -a 6 -p pix` fills a
//! cart, places the order and prints the receipt.

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;

use pastelaria::{
    config::{Command, OrderArgs, StorefrontConfig},
    observability::init_logging,
    receipt::Receipt,
    storefront::Storefront,
};

fn main() -> Result<()> {
    let config = StorefrontConfig::load()?;

    init_logging(&config.log_level)?;

    let catalog = config.catalog()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match &config.command {
        Command::Menu => catalog.write_to(&mut handle)?,
        Command::Order(args) => place_order(&mut Storefront::new(catalog), args, &mut handle)?,
    }

    handle.flush()?;

    Ok(())
}

fn place_order(storefront: &mut Storefront, args: &OrderArgs, out: &mut impl Write) -> Result<()> {
    let mut catalog_view = storefront.catalog_view();

    for id in args.additions() {
        catalog_view.add(id)?;
    }

    let mut cart_view = storefront.cart_view();

    for id in args.removals() {
        if cart_view.remove(id).is_none() {
            info!(product = %id, "asked to remove a product that is not in the cart");
        }
    }

    let order = cart_view.checkout(args.payment, &mut rand::thread_rng())?;

    Receipt::from_order(&order)?.write_to(out)?;

    Ok(())
}
