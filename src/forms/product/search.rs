use crate::helpers::Page;
use serde::Deserialize;

/// `?keyword=..&page=..`, both optional.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub page: u32,
}

impl Search {
    pub fn page(&self) -> Page {
        Page::new(self.page)
    }
}
