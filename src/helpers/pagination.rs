use serde_derive::Deserialize;

/// Items per page of every "next" listing.
pub const PAGE_SIZE: i64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub page: u32,
}

impl Page {
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * PAGE_SIZE
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}
