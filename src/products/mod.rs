pub mod models;

use crate::db::{Database, DbError};
use crate::products::models::{NewProduct, Product, ProductUpdate};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error};


const PRODUCTS_NODE: &str = "products";

#[derive(Error, Debug)]
pub enum ProductError {
    /// Rejected before any remote call was made.
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Store for catalog records.
pub struct ProductStore {
    db: Database,
}

impl ProductStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validates the draft, assigns a push id and writes the record.
    /// Validation failures make no remote call.
    pub async fn add_product(&self, draft: NewProduct) -> Result<Product, ProductError> {
        if draft.image_url.trim().is_empty() {
            return Err(ProductError::Invalid(
                "Please select an image first".to_string(),
            ));
        }
        if draft.name.trim().is_empty() || draft.description.trim().is_empty() {
            return Err(ProductError::Invalid("Please fill all fields".to_string()));
        }
        validate_price(draft.price)?;

        let product = Product {
            id: self.db.push_id(),
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image_url: draft.image_url,
        };

        let path = format!("{}/{}", PRODUCTS_NODE, product.id);
        match self.db.reference(&path).set(&product).await {
            Ok(()) => {
                debug!(id = %product.id, name = %product.name, "product added");
                Ok(product)
            }
            Err(e) => {
                error!(name = %product.name, error = %e, "failed to add product");
                Err(e.into())
            }
        }
    }

    /// Overwrites only the fields populated in `update`; everything else
    /// keeps its stored value.
    pub async fn update_product(&self, id: &str, update: &ProductUpdate) -> Result<(), ProductError> {
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let path = format!("{}/{}", PRODUCTS_NODE, id);
        match self.db.reference(&path).update(update).await {
            Ok(()) => {
                debug!(id, "product updated");
                Ok(())
            }
            Err(e) => {
                error!(id, error = %e, "failed to update product");
                Err(e.into())
            }
        }
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ProductError> {
        let path = format!("{}/{}", PRODUCTS_NODE, id);
        Ok(self.db.reference(&path).get().await?)
    }

    /// Reads the whole catalog, ordered by name.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let records: Option<HashMap<String, Product>> =
            self.db.reference(PRODUCTS_NODE).get().await?;

        let mut products: Vec<Product> = records.unwrap_or_default().into_values().collect();
        products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(products)
    }

    /// Case-insensitive name search over the catalog.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        let needle = query.trim().to_lowercase();
        let mut products = self.list_products().await?;
        if !needle.is_empty() {
            products.retain(|p| p.name.to_lowercase().contains(&needle));
        }
        Ok(products)
    }
}

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ProductError::Invalid(
            "Please enter a valid price".to_string(),
        ));
    }
    Ok(())
}
