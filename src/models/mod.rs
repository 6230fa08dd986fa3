mod category;
mod order;
pub mod product;
mod review;
pub mod user;

pub use category::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
