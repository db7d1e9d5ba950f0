//! Dispatch back-office client library
//!
//! A client-side table engine (filter, sort, paginate, select, show/hide
//! columns) over the dynamic rows served by the dispatch backend, plus the
//! async HTTP client that fetches and mutates them.

pub mod api;
pub mod error;
pub mod model;
pub mod session;
pub mod table;
