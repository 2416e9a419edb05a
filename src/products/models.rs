use serde::{Deserialize, Serialize};

/// Catalog record stored under `products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productId")]
    pub id: String,
    #[serde(rename = "productName")]
    pub name: String,
    #[serde(rename = "productPrice")]
    pub price: f64,
    #[serde(rename = "productDesc")]
    pub description: String,
    #[serde(rename = "image", default)]
    pub image_url: String,
}

/// Input for a new catalog entry; the id is assigned on write.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
}

/// Sparse product update; only the populated fields are written.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProductUpdate {
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "productPrice", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "productDesc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
