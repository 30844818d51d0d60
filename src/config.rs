//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    catalog::{Catalog, CatalogError},
    checkout::PaymentMethod,
    products::ProductId,
};

/// Pastelaria storefront
#[derive(Debug, Parser)]
#[command(name = "pastelaria", about = "Pastelaria storefront cart", long_about = None)]
pub struct StorefrontConfig {
    /// Catalog YAML file (defaults to the built-in menu)
    #[arg(long, env = "PASTELARIA_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu
    Menu,

    /// Build a cart, check it out and print the receipt
    Order(OrderArgs),
}

/// Arguments for placing an order
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Product to add; repeat to add more units
    #[arg(short, long = "add", value_name = "ID")]
    pub add: Vec<u32>,

    /// Product to remove after adding
    #[arg(short, long = "remove", value_name = "ID")]
    pub remove: Vec<u32>,

    /// Payment method shown on the receipt
    #[arg(short, long, value_enum, default_value = "cash")]
    pub payment: PaymentMethod,
}

impl OrderArgs {
    /// Products to add, in order.
    pub fn additions(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.add.iter().copied().map(ProductId::new)
    }

    /// Products to remove, in order.
    pub fn removals(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.remove.iter().copied().map(ProductId::new)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The configured catalog, or the built-in menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_arguments_parse() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "pastelaria",
            "order",
            "--add",
            "1",
            "-a",
            "1",
            "--add",
            "6",
            "--remove",
            "6",
            "--payment",
            "credit-card",
        ])?;

        let Command::Order(args) = config.command else {
            return Err("expected order command".into());
        };

        assert_eq!(args.additions().map(ProductId::get).collect::<Vec<_>>(), vec![1, 1, 6]);
        assert_eq!(args.removals().map(ProductId::get).collect::<Vec<_>>(), vec![6]);
        assert_eq!(args.payment, PaymentMethod::CreditCard);

        Ok(())
    }

    #[test]
    fn payment_defaults_to_cash() -> TestResult {
        let config = StorefrontConfig::try_parse_from(["pastelaria", "order", "-a", "2"])?;

        let Command::Order(args) = config.command else {
            return Err("expected order command".into());
        };

        assert_eq!(args.payment, PaymentMethod::Cash);

        Ok(())
    }

    #[test]
    fn catalog_path_is_loaded() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "pastelaria",
            "--catalog",
            "./fixtures/catalog/pastelaria.yml",
            "menu",
        ])?;

        assert!(matches!(config.command, Command::Menu));
        assert_eq!(config.catalog()?.len(), 7);

        Ok(())
    }
}
