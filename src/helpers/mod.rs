pub(crate) mod json;
pub mod multipart;
pub mod pagination;

pub(crate) use json::*;
pub use pagination::{Page, PAGE_SIZE};
