use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    pub buyer: String, // external user id
    pub created_at: DateTime<Utc>,
}

// line item linking an order to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct OrderedProduct {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>, // cleared when the product is deleted
    pub quantity: i32,
}
