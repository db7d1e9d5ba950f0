//! Error types

mod api;
mod auth;
mod field;

pub use api::*;
pub use auth::*;
pub use field::*;

/// Top-level error for client and session operations.
///
/// The table engine itself never fails; everything here comes from the
/// backend collaborator or from decoding what it sent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP or decoding failure talking to the backend.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A row field was missing or had the wrong type.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}
