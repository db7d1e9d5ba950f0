//! Typed models

mod field;
mod row;
mod row_serde;
mod value;

pub use field::*;
pub use row::*;
pub use value::*;
