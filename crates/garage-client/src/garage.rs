//! Client-side inventory state.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, instrument};

use garage_core::{DeleteOutcome, DocId, Document, Revision};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::form::VehicleForm;

/// Record being edited, with the revision it was loaded at.
#[derive(Debug, Clone)]
struct EditTarget {
    id: DocId,
    rev: Revision,
}

/// The client's view of the inventory.
///
/// Records are cached by id. Each mutation applies the server's answer to the
/// one affected entry; a failed request leaves the cache as it was.
#[derive(Debug)]
pub struct Garage {
    api: ApiClient,
    vehicles: BTreeMap<DocId, Document>,
    editing: Option<EditTarget>,
}

impl Garage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            vehicles: BTreeMap::new(),
            editing: None,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Replace the cache with every record from the server.
    ///
    /// Returns the number of records loaded.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize, ClientError> {
        let docs = self.api.read_all().await?;
        self.vehicles = docs.into_iter().map(|doc| (doc.id.clone(), doc)).collect();
        debug!(count = self.vehicles.len(), "Loaded vehicles");
        Ok(self.vehicles.len())
    }

    /// Cached records in id order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Document> {
        self.vehicles.values()
    }

    pub fn get(&self, id: &DocId) -> Option<&Document> {
        self.vehicles.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Validate the form and store it as a new record.
    ///
    /// Nothing is sent if the form does not validate.
    #[instrument(skip(self, form))]
    pub async fn create(&mut self, form: &VehicleForm) -> Result<&Document, ClientError> {
        let vehicle = form.validate()?;
        let doc = self.api.create(&vehicle).await?;
        debug!(id = %doc.id, "Created vehicle");

        Ok(self.cache(doc))
    }

    /// Start editing a cached record and return its pre-filled form.
    pub fn begin_edit(&mut self, id: &DocId) -> Result<VehicleForm, ClientError> {
        let doc = self
            .vehicles
            .get(id)
            .ok_or_else(|| ClientError::UnknownVehicle(id.clone()))?;

        self.editing = Some(EditTarget {
            id: doc.id.clone(),
            rev: doc.rev.clone(),
        });
        Ok(VehicleForm::from_document(doc))
    }

    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<&DocId> {
        self.editing.as_ref().map(|target| &target.id)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate the form and write it over the record being edited.
    ///
    /// The write carries the revision seen at [`begin_edit`](Self::begin_edit),
    /// so it fails if the record changed in the meantime. On failure the edit
    /// stays open.
    #[instrument(skip(self, form))]
    pub async fn submit_edit(&mut self, form: &VehicleForm) -> Result<&Document, ClientError> {
        let target = self.editing.clone().ok_or(ClientError::NoEditTarget)?;
        let vehicle = form.validate()?;

        let doc = self
            .api
            .update(&target.id, &vehicle, Some(&target.rev))
            .await?;
        debug!(id = %doc.id, rev = %doc.rev, "Updated vehicle");

        self.editing = None;
        Ok(self.cache(doc))
    }

    /// Delete a cached record at its cached revision.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &DocId) -> Result<DeleteOutcome, ClientError> {
        let rev = self
            .vehicles
            .get(id)
            .map(|doc| doc.rev.clone())
            .ok_or_else(|| ClientError::UnknownVehicle(id.clone()))?;

        let outcome = self.api.delete(id, Some(&rev)).await?;
        debug!(id = %id, "Deleted vehicle");

        self.vehicles.remove(id);
        if self.editing().is_some_and(|editing| editing == id) {
            self.editing = None;
        }
        Ok(outcome)
    }

    /// Insert or replace a record in the cache.
    fn cache(&mut self, doc: Document) -> &Document {
        match self.vehicles.entry(doc.id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(doc);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(doc),
        }
    }
}
