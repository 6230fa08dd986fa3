use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_products: Vec<CartItem>,
}

/// Cart entry as stored by the client. Only `id` is interpreted, the rest
/// is echoed back untouched.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cart {
    pub fn ids(&self) -> Vec<String> {
        self.cart_products.iter().map(|item| item.id.clone()).collect()
    }

    /// Keeps the entries whose id is in `existing`, in cart order.
    pub fn retain_existing(self, existing: &[String]) -> Vec<CartItem> {
        self.cart_products
            .into_iter()
            .filter(|item| existing.contains(&item.id))
            .collect()
    }
}
