use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

const SHORT_ID_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct Product {
    // internal id, never exposed in urls
    pub id: i32,
    // external id used by every public route
    pub short_id: String,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub inventory: i32,
    pub company: String,
    pub category_id: i32,
    pub image_url: String,
    pub image_key: String,
    // aggregate rating, kept in step with `review_ids`
    pub star_rate_sum: i32,
    pub review_count: i32,
    pub review_ids: Vec<i32>,
    pub sales_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product row joined with the names of its category chain.
#[derive(Debug, Clone, PartialEq, Default, sqlx::FromRow)]
pub struct CategorizedProduct {
    #[sqlx(flatten)]
    pub product: Product,
    pub big_category_name: String,
    pub small_category_name: String,
}

/// Rating aggregate plus the ordered review references of a product.
#[derive(Debug, Clone, PartialEq, Default, sqlx::FromRow)]
pub struct ReviewSummary {
    pub short_id: String,
    pub star_rate_sum: i32,
    pub review_count: i32,
    pub review_ids: Vec<i32>,
}

impl ReviewSummary {
    /// Average rating rendered with one decimal, "0" when nothing was rated yet.
    pub fn star_rate(&self) -> String {
        if self.star_rate_sum == 0 || self.review_count == 0 || self.review_ids.is_empty() {
            return "0".to_string();
        }

        format!(
            "{:.1}",
            self.star_rate_sum as f64 / self.review_count as f64
        )
    }

    pub fn has_reviews(&self) -> bool {
        self.star_rate() != "0"
    }
}

pub fn generate_short_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rate_is_zero_without_reviews() {
        let summary = ReviewSummary::default();
        assert_eq!(summary.star_rate(), "0");
        assert!(!summary.has_reviews());
    }

    #[test]
    fn star_rate_has_one_decimal() {
        let summary = ReviewSummary {
            short_id: "abc".to_string(),
            star_rate_sum: 14,
            review_count: 3,
            review_ids: vec![1, 2, 3],
        };
        assert_eq!(summary.star_rate(), "4.7");
        assert!(summary.has_reviews());
    }

    #[test]
    fn star_rate_ignores_dangling_aggregate() {
        // counters without linked reviews are not trusted
        let summary = ReviewSummary {
            short_id: "abc".to_string(),
            star_rate_sum: 5,
            review_count: 1,
            review_ids: vec![],
        };
        assert_eq!(summary.star_rate(), "0");
    }

    #[test]
    fn short_ids_are_alphanumeric_and_distinct() {
        let a = generate_short_id();
        let b = generate_short_id();
        assert_eq!(a.len(), SHORT_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
