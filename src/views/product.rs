use crate::models;
use serde::Serialize;
use std::convert::From;

#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryName {
    pub big_category_name: String,
    pub small_category_name: String,
}

impl From<models::CategoryNames> for CategoryName {
    fn from(names: models::CategoryNames) -> Self {
        Self {
            big_category_name: names.big_category_name,
            small_category_name: names.small_category_name,
        }
    }
}

/// Product with its category chain spelled out by name.
#[derive(Debug, Serialize, Default)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: models::Product,
    pub category: CategoryName,
}

impl From<models::CategorizedProduct> for ProductWithCategory {
    fn from(row: models::CategorizedProduct) -> Self {
        Self {
            product: row.product,
            category: CategoryName {
                big_category_name: row.big_category_name,
                small_category_name: row.small_category_name,
            },
        }
    }
}

/// Newest product of one big category.
#[derive(Debug, Serialize, Default)]
pub struct CategoryLatest {
    pub category: String,
    pub product: models::Product,
}

impl From<models::CategorizedProduct> for CategoryLatest {
    fn from(row: models::CategorizedProduct) -> Self {
        Self {
            category: row.big_category_name,
            product: row.product,
        }
    }
}

fn storage_status(image_deleted: bool) -> &'static str {
    if image_deleted {
        "ok"
    } else {
        "no"
    }
}

/// Product after an update. `image_deleted` is only present when the
/// previous image had to be removed from storage.
#[derive(Debug, Serialize, Default)]
pub struct Updated {
    #[serde(flatten)]
    pub product: models::Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl Updated {
    pub fn new(product: models::Product, image_deleted: Option<bool>) -> Self {
        Self {
            product,
            image_deleted,
            status: image_deleted.map(storage_status),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct Removed {
    pub product_id: String,
    pub deleted: bool,
    pub image_deleted: bool,
    pub status: &'static str,
}

impl Removed {
    pub fn new(product_id: String, deleted: bool, image_deleted: bool) -> Self {
        Self {
            product_id,
            deleted,
            image_deleted,
            status: storage_status(image_deleted),
        }
    }
}
