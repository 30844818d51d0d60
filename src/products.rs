//! Products

use std::{collections::BTreeMap, fmt};

use serde::Deserialize;

/// Opaque key/value data carried alongside a product without being interpreted.
pub type Metadata = BTreeMap<String, String>;

/// Stable catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as listed on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price text (e.g. "R$ 16,00")
    pub price: String,

    /// Short description shown under the name
    #[serde(default)]
    pub description: Option<String>,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Any further fields, passed through untouched
    #[serde(default)]
    pub extra: Metadata,
}

impl CatalogItem {
    /// Creates a catalog item with no description, image or extra fields.
    pub fn new(id: ProductId, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            description: None,
            image: None,
            extra: Metadata::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Adds an extra pass-through field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Everything besides id, name and price, flattened into one map.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = self.extra.clone();

        if let Some(description) = &self.description {
            metadata.insert("description".to_string(), description.clone());
        }

        if let Some(image) = &self.image {
            metadata.insert("image".to_string(), image.clone());
        }

        metadata
    }
}
