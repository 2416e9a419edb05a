use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

/// Denormalized order snapshot stored under `orders/{uid}/{orderId}`.
/// Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub product_name: String,
    pub product_price: f64,
    /// Opaque reference to the product image.
    pub product_image: String,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub timestamp: String,
}

/// Input for `place_order`; key and timestamp are assigned on write.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub product_name: String,
    pub product_price: f64,
    pub product_image: String,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}
