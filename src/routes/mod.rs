pub mod health_checks;
pub(crate) mod login;
pub(crate) mod product;
pub(crate) mod review;

pub use health_checks::*;
