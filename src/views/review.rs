use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a product's review feed.
#[derive(Debug, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub comment: String,
    pub star_rate: i32,
    pub created_at: DateTime<Utc>,
    pub author: String,
}

impl From<models::Review> for FeedEntry {
    fn from(review: models::Review) -> Self {
        Self {
            comment: review.comment,
            star_rate: review.star_rate,
            created_at: review.created_at,
            author: review.author_name,
        }
    }
}

/// Rating of a product together with its reviews. Products nobody rated yet
/// carry `hasReview: "no"` instead of a feed.
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviews {
    pub product_star_rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_review: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_reviews: Option<Vec<FeedEntry>>,
}

impl ProductReviews {
    pub fn empty() -> Self {
        Self {
            product_star_rate: "0".to_string(),
            has_review: Some("no"),
            send_reviews: None,
        }
    }

    pub fn new(summary: &models::ReviewSummary, reviews: Vec<models::Review>) -> Self {
        if !summary.has_reviews() {
            return Self::empty();
        }

        Self {
            product_star_rate: summary.star_rate(),
            has_review: None,
            send_reviews: Some(reviews.into_iter().map(FeedEntry::from).collect()),
        }
    }
}
