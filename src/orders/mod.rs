pub mod models;

use crate::db::{Database, DbError};
use crate::orders::models::{Order, OrderRequest};
use crate::session::SessionHandle;
use chrono::Local;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error};

#[cfg(test)]
mod tests;

const ORDERS_NODE: &str = "orders";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum OrderError {
    /// Rejected before any remote call was made.
    #[error("{0}")]
    Invalid(String),
    #[error("Please sign in to place an order.")]
    NotSignedIn,
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Writes order snapshots under the signed-in user.
pub struct OrderRecorder {
    db: Database,
    session: SessionHandle,
}

impl OrderRecorder {
    pub fn new(db: Database, session: SessionHandle) -> Self {
        Self { db, session }
    }

    /// Records the order in a single write at `orders/{uid}/{orderId}`.
    ///
    /// A blank delivery address is rejected before anything is sent. A failed
    /// write is terminal; nothing is retried or rolled back.
    pub async fn place_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        if request.delivery_address.trim().is_empty() {
            return Err(OrderError::Invalid(
                "Please enter your delivery address.".to_string(),
            ));
        }

        let uid = self.session.uid().ok_or(OrderError::NotSignedIn)?;

        let order = Order {
            order_id: self.db.push_id(),
            product_name: request.product_name,
            product_price: request.product_price,
            product_image: request.product_image,
            delivery_address: request.delivery_address,
            payment_method: request.payment_method,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        let path = format!("{}/{}/{}", ORDERS_NODE, uid, order.order_id);
        match self.db.reference(&path).set(&order).await {
            Ok(()) => {
                debug!(%uid, order_id = %order.order_id, "order saved");
                Ok(order)
            }
            Err(e) => {
                error!(%uid, error = %e, "failed to save order");
                Err(e.into())
            }
        }
    }

    /// Reads the signed-in user's order history, oldest first.
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        let uid = self.session.uid().ok_or(OrderError::NotSignedIn)?;

        let path = format!("{}/{}", ORDERS_NODE, uid);
        let records: Option<HashMap<String, Order>> = self.db.reference(&path).get().await?;

        let mut orders: Vec<Order> = records.unwrap_or_default().into_values().collect();
        // Push ids sort chronologically.
        orders.sort_by(|a, b| a.order_id.cmp(&b.order_id));
        Ok(orders)
    }
}
