//! An in-memory shopping list.
//!
//! [`ops::ShoppingListController`] holds the list and its rules; the
//! [`tui`] and [`cli`] modules are thin presentation layers over it.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod tui;
pub mod util;
