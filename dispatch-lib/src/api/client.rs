//! HTTP client for the dispatch backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use super::Backend;
use super::Collection;
use super::DeleteRequest;
use super::Resource;
use super::Settings;
use super::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Row;
use crate::model::RowDraft;
use crate::model::RowId;

/// Backend URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

/// JSON-over-HTTP [`Backend`] implementation.
///
/// Cheap to clone (uses `Arc` internally). Every request carries a bearer
/// token from the configured [`TokenProvider`].
///
/// # Example
///
/// ```ignore
/// use dispatch_lib::api::{Backend, DispatchClient, Resource, StaticTokenProvider};
///
/// let client = DispatchClient::builder()
///     .url("http://localhost:3000/")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let tasks = client.list(Resource::Tasks).await?;
/// ```
#[derive(Clone)]
pub struct DispatchClient {
    inner: Arc<DispatchClientInner>,
}

struct DispatchClientInner {
    base_url: Url,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl DispatchClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> DispatchClientBuilder<Missing, Missing> {
        DispatchClientBuilder::new()
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Builds `{base}/{segments...}` with each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let token = self
            .inner
            .token_provider
            .get_token(self.inner.base_url.as_str())
            .await?;

        let mut request = request.bearer_auth(&token.access_token);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            warn!("{} returned {}", url, status);
            return Err(ApiError::http(status.as_u16(), body).into());
        }

        debug!("{} returned {} ({} bytes)", url, status, body.len());
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }

    fn map_send_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

#[async_trait]
impl Backend for DispatchClient {
    async fn list(&self, resource: Resource) -> Result<Collection, Error> {
        let url = self.endpoint(&[resource.path()])?;
        debug!("GET {}", url);
        self.send(self.inner.http_client.get(url)).await
    }

    async fn create(&self, resource: Resource, draft: &RowDraft) -> Result<Row, Error> {
        let url = self.endpoint(&[resource.path()])?;
        debug!("POST {}", url);
        self.send(self.inner.http_client.post(url).json(draft)).await
    }

    async fn update(&self, resource: Resource, id: &RowId, draft: &RowDraft) -> Result<Row, Error> {
        let id = id.to_string();
        let url = self.endpoint(&[resource.path(), &id])?;
        debug!("PUT {}", url);
        self.send(self.inner.http_client.put(url).json(draft)).await
    }

    async fn delete(&self, resource: Resource, ids: &[RowId]) -> Result<Vec<RowId>, Error> {
        let url = self.endpoint(&[resource.path()])?;
        debug!("DELETE {} ({} ids)", url, ids.len());
        let body = DeleteRequest::new(ids.iter().cloned());
        self.send(self.inner.http_client.delete(url).json(&body)).await
    }

    async fn settings(&self) -> Result<Settings, Error> {
        let url = self.endpoint(&["settings"])?;
        debug!("GET {}", url);
        self.send(self.inner.http_client.get(url)).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`DispatchClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct DispatchClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl DispatchClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for DispatchClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DispatchClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> DispatchClientBuilder<Set<String>, P> {
        DispatchClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> DispatchClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> DispatchClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        DispatchClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> DispatchClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl DispatchClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`DispatchClient`].
    ///
    /// Fails if the URL does not parse or cannot carry a path.
    pub fn build(self) -> Result<DispatchClient, ApiError> {
        let raw = self.url.0;
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(raw));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(DispatchClient {
            inner: Arc::new(DispatchClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
