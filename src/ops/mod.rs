pub mod controller;
pub mod script;
pub mod validate;

pub use controller::{Change, ShoppingListController};
pub use validate::ValidationError;
