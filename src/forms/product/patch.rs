use crate::helpers::multipart::{MultipartError, MultipartForm};
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Partial product update. A field is applied only when it was sent,
/// an explicit empty description or zero inventory is a real value.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatchProduct {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub name: Option<String>,
    #[validate(minimum = 1)]
    pub price: Option<i32>,
    #[validate(max_length = 5000)]
    pub description: Option<String>,
    #[validate(minimum = 0)]
    pub inventory: Option<i32>,
    #[validate(max_length = 200)]
    pub company: Option<String>,
    #[serde(rename = "Scategory")]
    #[validate(min_length = 1)]
    pub category: Option<String>,
}

impl TryFrom<&MultipartForm> for PatchProduct {
    type Error = MultipartError;

    fn try_from(form: &MultipartForm) -> Result<Self, Self::Error> {
        Ok(PatchProduct {
            name: form.string("name"),
            price: form.parse("price")?,
            description: form.string("description"),
            inventory: form.parse("inventory")?,
            company: form.string("company"),
            category: form.string("Scategory"),
        })
    }
}

impl PatchProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.inventory.is_none()
            && self.company.is_none()
            && self.category.is_none()
    }

    /// `category_id` is the id `category` resolved to.
    pub fn update(self, product: &mut models::Product, category_id: Option<i32>) {
        if let Some(name) = self.name {
            product.name = name;
        }

        if let Some(price) = self.price {
            product.price = price;
        }

        if let Some(description) = self.description {
            product.description = description;
        }

        if let Some(inventory) = self.inventory {
            product.inventory = inventory;
        }

        if let Some(company) = self.company {
            product.company = company;
        }

        if let Some(category_id) = category_id {
            product.category_id = category_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> models::Product {
        models::Product {
            name: "Chair".to_string(),
            price: 50000,
            description: "oak".to_string(),
            inventory: 4,
            company: "Woodies".to_string(),
            category_id: 1,
            ..Default::default()
        }
    }

    #[test]
    fn only_sent_fields_are_applied() {
        let mut chair = product();
        let patch = PatchProduct {
            price: Some(45000),
            ..Default::default()
        };
        patch.update(&mut chair, None);

        assert_eq!(chair.price, 45000);
        assert_eq!(chair.name, "Chair");
        assert_eq!(chair.description, "oak");
        assert_eq!(chair.inventory, 4);
        assert_eq!(chair.category_id, 1);
    }

    #[test]
    fn empty_description_and_zero_inventory_are_applied() {
        let mut chair = product();
        let patch = PatchProduct {
            description: Some(String::new()),
            inventory: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        patch.update(&mut chair, Some(9));

        assert_eq!(chair.description, "");
        assert_eq!(chair.inventory, 0);
        assert_eq!(chair.category_id, 9);
    }

    #[test]
    fn zero_price_is_rejected() {
        let patch = PatchProduct {
            price: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn blank_multipart_numbers_are_not_sent() {
        let form = MultipartForm::from_parts(&[("price", ""), ("name", "Stool")], None);
        let patch = PatchProduct::try_from(&form).unwrap();

        assert_eq!(patch.price, None);
        assert_eq!(patch.name, Some("Stool".to_string()));
        assert!(!patch.is_empty());
        assert!(PatchProduct::default().is_empty());
    }
}
