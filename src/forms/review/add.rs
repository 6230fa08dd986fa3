use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddReview {
    #[validate(min_length = 1)]
    #[validate(max_length = 1000)]
    pub comment: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub star_rate: i32,
    // product short id
    #[validate(min_length = 1)]
    pub product_id: String,
}

impl AddReview {
    pub fn to_model(&self, author: &models::User) -> models::Review {
        let now = Utc::now();
        let mut review = models::Review::default();
        review.comment = self.comment.clone();
        review.star_rate = self.star_rate;
        review.author_id = author.id.clone();
        review.author_name = author.name.clone();
        review.created_at = now;
        review.updated_at = now;

        review
    }
}
