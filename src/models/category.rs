use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct BigCategory {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct SmallCategory {
    pub id: i32,
    pub name: String,
    pub big_category_id: i32,
}

/// Which tier a category name resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryScope {
    Small(SmallCategory),
    Big(BigCategory),
}

/// Both tiers of a product's category.
#[derive(Debug, Clone, PartialEq, Default, sqlx::FromRow)]
pub struct CategoryNames {
    pub big_category_name: String,
    pub small_category_name: String,
}
