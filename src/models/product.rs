//! Product documents owned by a seller.

use serde::{Deserialize, Serialize};

/// A product stored at `sellers/{sellerId}/products/{id}`.
///
/// Price and quantity are kept as the text the seller entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    /// `data:` URI, or empty when the product has no image
    pub image: String,
}

/// Fields submitted when adding a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub description: String,
}

/// A product ready to be written, image already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    pub image: String,
}
