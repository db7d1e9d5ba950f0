//! Backend collaborator trait

use async_trait::async_trait;

use super::Collection;
use super::Resource;
use super::Settings;
use crate::error::Error;
use crate::model::Row;
use crate::model::RowDraft;
use crate::model::RowId;

/// CRUD access to the backend's resource collections.
///
/// [`DispatchClient`](super::DispatchClient) is the HTTP implementation;
/// tests substitute an in-memory one.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetches a whole collection (`GET /<resource>`).
    async fn list(&self, resource: Resource) -> Result<Collection, Error>;

    /// Creates a row (`POST /<resource>`) and returns it as stored.
    async fn create(&self, resource: Resource, draft: &RowDraft) -> Result<Row, Error>;

    /// Replaces a row's fields (`PUT /<resource>/<id>`) and returns it as stored.
    async fn update(&self, resource: Resource, id: &RowId, draft: &RowDraft) -> Result<Row, Error>;

    /// Deletes rows (`DELETE /<resource>`) and returns the ids actually deleted.
    async fn delete(&self, resource: Resource, ids: &[RowId]) -> Result<Vec<RowId>, Error>;

    /// Fetches the system settings (`GET /settings`).
    async fn settings(&self) -> Result<Settings, Error>;
}
