//! Bearer token seam

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer token issued by the backend's `/login` or `/refresh` endpoints.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token with no known expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a token that expires at `expires_at`.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Supplies the bearer token attached to every backend request.
///
/// The client calls `get_token` before each request, so implementations
/// should cache and refresh on their own.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use dispatch_lib::api::{AccessToken, TokenProvider};
/// use dispatch_lib::error::AuthError;
///
/// struct KeyringProvider;
///
/// #[async_trait]
/// impl TokenProvider for KeyringProvider {
///     async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError> {
///         let token = read_keyring(base_url).ok_or(AuthError::NotAuthenticated)?;
///         Ok(AccessToken::new(token))
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets a token for the backend at `base_url`.
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError>;
}

/// Always hands out the same token.
///
/// # Example
///
/// ```
/// use dispatch_lib::api::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a provider for a raw token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a provider from an existing [`AccessToken`].
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        if self.token.is_expired() {
            return Err(AuthError::TokenExpired {
                message: "static token cannot be refreshed".to_string(),
            });
        }
        Ok(self.token.clone())
    }
}
