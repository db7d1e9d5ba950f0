//! One resource screen: a backend, a collection and its table state
//!
//! The table engine is synchronous. This module does the async part: it
//! fetches a collection, hands it to the [`TableController`], and after
//! every successful mutation fetches again and reseeds.

use std::collections::HashMap;

use log::debug;
use log::info;
use tokio_util::sync::CancellationToken;

use crate::api::Backend;
use crate::api::Collection;
use crate::api::Resource;
use crate::error::Error;
use crate::model::FieldMeta;
use crate::model::FieldType;
use crate::model::Row;
use crate::model::RowDraft;
use crate::model::RowId;
use crate::table::FilterValue;
use crate::table::TableConfig;
use crate::table::TableController;

/// A resource collection bound to a [`Backend`].
///
/// # Example
///
/// ```ignore
/// use dispatch_lib::api::Resource;
/// use dispatch_lib::session::ResourceView;
///
/// let mut view = ResourceView::new(client, Resource::Vehicles);
/// view.refresh().await?;
///
/// view.table_mut().toggle_all_visible(true);
/// let deleted = view.delete_selected().await?;
/// ```
pub struct ResourceView<B> {
    backend: B,
    resource: Resource,
    table: TableController,
    model: HashMap<String, FieldMeta>,
}

impl<B: Backend> ResourceView<B> {
    /// Creates an empty view with the default table configuration.
    pub fn new(backend: B, resource: Resource) -> Self {
        Self::with_config(backend, resource, TableConfig::default())
    }

    /// Creates an empty view.
    pub fn with_config(backend: B, resource: Resource, config: TableConfig) -> Self {
        Self {
            backend,
            resource,
            table: TableController::new(config),
            model: HashMap::new(),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn table(&self) -> &TableController {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableController {
        &mut self.table
    }

    /// Field metadata from the last fetch.
    pub fn model(&self) -> &HashMap<String, FieldMeta> {
        &self.model
    }

    /// Fetches the collection and reseeds the table.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let collection = self.backend.list(self.resource).await?;
        self.apply(collection);
        Ok(())
    }

    /// Like [`refresh`](Self::refresh), but gives up when `cancel` fires.
    ///
    /// Returns [`Error::Cancelled`] and leaves the table untouched if the
    /// token is cancelled before the fetch completes.
    pub async fn refresh_cancellable(&mut self, cancel: &CancellationToken) -> Result<(), Error> {
        let collection = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Refresh of {} cancelled", self.resource);
                return Err(Error::Cancelled);
            }
            result = self.backend.list(self.resource) => result?,
        };
        self.apply(collection);
        Ok(())
    }

    fn apply(&mut self, collection: Collection) {
        info!("Fetched {} {}", collection.data.len(), self.resource);
        self.model = collection.model;
        self.table.load(collection.data);
    }

    /// Creates a row, then refreshes.
    pub async fn create(&mut self, draft: &RowDraft) -> Result<Row, Error> {
        let row = self.backend.create(self.resource, draft).await?;
        info!("Created {} {}", self.resource, row.id());
        self.refresh().await?;
        Ok(row)
    }

    /// Updates a row, then refreshes.
    pub async fn update(&mut self, id: &RowId, draft: &RowDraft) -> Result<Row, Error> {
        let row = self.backend.update(self.resource, id, draft).await?;
        info!("Updated {} {}", self.resource, id);
        self.refresh().await?;
        Ok(row)
    }

    /// Deletes every selected row, then refreshes.
    ///
    /// Does nothing (and makes no request) when the selection is empty.
    pub async fn delete_selected(&mut self) -> Result<Vec<RowId>, Error> {
        let ids = self.table.selected_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let deleted = self.backend.delete(self.resource, &ids).await?;
        info!("Deleted {} of {} selected {}", deleted.len(), ids.len(), self.resource);
        self.refresh().await?;
        Ok(deleted)
    }

    /// Type of a field according to the last fetched model.
    pub fn field_type(&self, field: &str) -> FieldType {
        self.model
            .get(field)
            .map(FieldMeta::field_type)
            .unwrap_or(FieldType::Other)
    }

    /// Parses raw input into the draft filter entry for `field`.
    ///
    /// Returns whether the resulting entry is active. Blank or unparseable
    /// input deactivates the entry.
    pub fn set_filter_input(&mut self, field: &str, input: &str) -> bool {
        let value = FilterValue::parse(input, self.field_type(field));
        let active = value.is_some();
        self.table.set_draft(field, value);
        active
    }
}
