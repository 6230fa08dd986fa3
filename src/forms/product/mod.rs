mod add;
mod cart;
mod delete;
mod patch;
mod search;

pub use add::AddProduct as Add;
pub use cart::{Cart, CartItem};
pub use delete::DeleteProduct as Delete;
pub use patch::PatchProduct as Patch;
pub use search::Search;
