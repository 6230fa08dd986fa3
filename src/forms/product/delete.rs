use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProduct {
    pub product_id: String,
    // used only when the product row is already gone
    pub image_key: Option<String>,
}
