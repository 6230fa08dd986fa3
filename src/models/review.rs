use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub comment: String,
    pub star_rate: i32, // 1..=5
    pub author_id: String, // external user id taken from the token
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}
