//! Client-side table engine
//!
//! Everything here is synchronous and infallible. Rows come in as a
//! [`Vec<Row>`](crate::model::Row), and each [`TableController::view`] call
//! derives the visible page by filtering, sorting and paginating them.

mod columns;
mod config;
mod controller;
mod filter;
mod page;
mod selection;
mod sort;

pub use columns::*;
pub use config::*;
pub use controller::*;
pub use filter::*;
pub use page::*;
pub use selection::*;
pub use sort::*;
