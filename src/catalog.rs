//! Catalog
//!
//! The menu is static data: a YAML list of products, validated once on load and then
//! only read. The shop's own menu is compiled into the crate.

use std::{fs, io, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    prices::{PriceError, format_price, parse_price},
    products::{CatalogItem, ProductId},
};

const BUILTIN_MENU: &str = include_str!("../fixtures/catalog/pastelaria.yml");

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file or writing the menu
    #[error("Catalog IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product's price text is malformed
    #[error("Product {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending product
        id: ProductId,

        /// Parse failure
        #[source]
        source: PriceError,
    },

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<CatalogItem>,
}

/// The menu, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogItem>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an id or a price does not parse.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for item in items {
            parse_price(&item.price).map_err(|source| CatalogError::InvalidPrice {
                id: item.id,
                source,
            })?;

            if catalog.index.contains_key(&item.id) {
                return Err(CatalogError::DuplicateProduct(item.id));
            }

            catalog.index.insert(item.id, catalog.products.len());
            catalog.products.push(item);
        }

        debug!(products = catalog.products.len(), "loaded catalog");

        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the products fail validation.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        Self::from_items(fixture.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "reading catalog");

        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// The shop's own menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded menu fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_MENU)
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: ProductId) -> Result<&CatalogItem, CatalogError> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Products in menu order.
    pub fn products(&self) -> impl Iterator<Item = &CatalogItem> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Prints the menu as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CatalogError> {
        let mut builder = Builder::default();

        builder.push_record(["#", "Product", "Description", "Price"]);

        for item in &self.products {
            // Validated on load.
            let price = parse_price(&item.price)
                .map_or_else(|_err| item.price.clone(), |price| format_price(&price));

            builder.push_record([
                item.id.to_string(),
                item.name.clone(),
                item.description.clone().unwrap_or_default(),
                price,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..4), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn builtin_menu_has_seven_products() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert_eq!(catalog.len(), 7);

        let queijo = catalog.product(ProductId::new(1))?;

        assert_eq!(queijo.name, "Pastel de Queijo");
        assert_eq!(queijo.price, "R$ 16,00");
        assert_eq!(queijo.image.as_deref(), Some("pastel_queijo.png"));

        Ok(())
    }

    #[test]
    fn products_iterate_in_menu_order() -> TestResult {
        let catalog = Catalog::builtin()?;

        let ids: Vec<u32> = catalog.products().map(|item| item.id.get()).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        Ok(())
    }

    #[test]
    fn from_yaml_accepts_optional_fields() -> TestResult {
        let catalog = Catalog::from_yaml(
            "products:\n  - id: 10\n    name: Caldo de Cana\n    price: R$ 9,50\n    extra:\n      size: 500ml\n",
        )?;

        let item = catalog.product(ProductId::new(10))?;

        assert_eq!(item.description, None);
        assert_eq!(item.extra.get("size").map(String::as_str), Some("500ml"));

        Ok(())
    }

    #[test]
    fn from_items_rejects_duplicate_ids() {
        let result = Catalog::from_items([
            CatalogItem::new(ProductId::new(1), "Pastel", "R$ 16,00"),
            CatalogItem::new(ProductId::new(1), "Pastel again", "R$ 17,00"),
        ]);

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));
    }

    #[test]
    fn from_items_rejects_malformed_prices() {
        let result = Catalog::from_items([CatalogItem::new(
            ProductId::new(3),
            "Pastel",
            "dezesseis reais",
        )]);

        assert!(matches!(
            result,
            Err(CatalogError::InvalidPrice { id, .. }) if id == ProductId::new(3)
        ));
    }

    #[test]
    fn from_yaml_rejects_malformed_yaml() {
        let result = Catalog::from_yaml("products: [");

        assert!(matches!(result, Err(CatalogError::Yaml(_))));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let result = Catalog::from_path("./fixtures/catalog/does-not-exist.yml");

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn product_not_found_returns_error() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert!(matches!(
            catalog.product(ProductId::new(42)),
            Err(CatalogError::ProductNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn write_to_lists_every_product() -> TestResult {
        let catalog = Catalog::builtin()?;
        let mut out = Vec::new();

        catalog.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Pastel de Camarão"));
        assert!(rendered.contains("R$ 18,00"));
        assert!(rendered.contains("Guaraná"));

        Ok(())
    }

    struct ClosedPipe;

    impl io::Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_to_keeps_the_io_error() -> TestResult {
        let catalog = Catalog::builtin()?;

        let result = catalog.write_to(ClosedPipe);

        assert!(matches!(
            result,
            Err(CatalogError::Io(ref err)) if err.kind() == io::ErrorKind::BrokenPipe
        ));

        Ok(())
    }
}
