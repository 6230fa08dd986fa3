use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Default, Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditReview {
    #[validate(min_length = 1)]
    #[validate(max_length = 1000)]
    pub comment: Option<String>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub star_rate: Option<i32>,
}

impl EditReview {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.star_rate.is_none()
    }

    pub fn update(self, review: &mut models::Review) {
        if let Some(comment) = self.comment {
            review.comment = comment;
        }

        if let Some(star_rate) = self.star_rate {
            review.star_rate = star_rate;
        }
    }
}

#[derive(Default, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub review_id: i32,
}
