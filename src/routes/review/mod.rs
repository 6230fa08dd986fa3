pub mod add;
pub mod delete;
pub mod edit;
pub mod get;
