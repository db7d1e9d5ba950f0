//! Authentication error types

/// Errors raised while obtaining a bearer token.
///
/// Login and token refresh live outside this crate; a [`TokenProvider`]
/// only reports why it could not hand out a token.
///
/// [`TokenProvider`]: crate::api::TokenProvider
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token is stored (user not logged in).
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The stored token expired and could not be refreshed.
    #[error("Token expired: {message}")]
    TokenExpired { message: String },
}
