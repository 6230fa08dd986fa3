use crate::helpers::multipart::{MultipartError, MultipartForm};
use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddProduct {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub name: String,
    #[validate(minimum = 1)]
    pub price: i32,
    #[validate(max_length = 5000)]
    pub description: String,
    #[validate(minimum = 0)]
    pub inventory: i32,
    #[validate(max_length = 200)]
    pub company: String,
    // small category name, resolved to an id by the route
    #[serde(rename = "Scategory")]
    #[validate(min_length = 1)]
    pub category: String,
}

impl TryFrom<&MultipartForm> for AddProduct {
    type Error = MultipartError;

    fn try_from(form: &MultipartForm) -> Result<Self, Self::Error> {
        Ok(AddProduct {
            name: form.string("name").unwrap_or_default(),
            price: form.parse("price")?.unwrap_or_default(),
            description: form.string("description").unwrap_or_default(),
            inventory: form.parse("inventory")?.unwrap_or_default(),
            company: form.string("company").unwrap_or_default(),
            category: form.string("Scategory").unwrap_or_default(),
        })
    }
}

impl AddProduct {
    pub fn into_model(self, category_id: i32, image_url: String, image_key: String) -> models::Product {
        let now = Utc::now();
        let mut product = models::Product::default();
        product.short_id = models::generate_short_id();
        product.name = self.name;
        product.price = self.price;
        product.description = self.description;
        product.inventory = self.inventory;
        product.company = self.company;
        product.category_id = category_id;
        product.image_url = image_url;
        product.image_key = image_key;
        product.created_at = now;
        product.updated_at = now;

        product
    }
}
