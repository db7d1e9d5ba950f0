//! Backend collaborator: resources, wire payloads and the HTTP client

mod auth;
mod backend;
mod client;
mod collection;
mod resource;

pub use auth::*;
pub use backend::*;
pub use client::*;
pub use collection::*;
pub use resource::*;
