//! Vehicle inventory operations over a document store.

use tracing::{debug, instrument};

use garage_core::{DeleteOutcome, DocId, Document, DocumentStore, Fields, Result, Revision, StoreError};

/// The inventory service the routes call into.
///
/// Holds the store handle; one instance is shared by every request.
#[derive(Debug)]
pub struct Inventory<S> {
    store: S,
}

impl<S: DocumentStore> Inventory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a new record. The store assigns its id and first revision.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: Fields) -> Result<Document> {
        let doc = self.store.insert(fields).await?;
        debug!(id = %doc.id, rev = %doc.rev, "Created record");
        Ok(doc)
    }

    #[instrument(skip(self))]
    pub async fn read_all(&self) -> Result<Vec<Document>> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn read_one(&self, id: &DocId) -> Result<Document> {
        self.store.get(id).await
    }

    /// Shallow-merge `patch` into the current record and write it back.
    ///
    /// With `expected_rev` set, the update only applies if the record is still
    /// at that revision.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: &DocId,
        patch: Fields,
        expected_rev: Option<Revision>,
    ) -> Result<Document> {
        let current = self.store.get(id).await?;
        check_revision(&current.rev, expected_rev.as_ref())?;

        let doc = self.store.put(&current.merged(patch)).await?;
        debug!(rev = %doc.rev, "Updated record");
        Ok(doc)
    }

    /// Delete a record at its current revision, or at `expected_rev` if given.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &DocId, expected_rev: Option<Revision>) -> Result<DeleteOutcome> {
        let current = self.store.get(id).await?;
        check_revision(&current.rev, expected_rev.as_ref())?;

        let outcome = self.store.destroy(id, &current.rev).await?;
        debug!(rev = %outcome.rev, "Deleted record");
        Ok(outcome)
    }
}

fn check_revision(current: &Revision, expected: Option<&Revision>) -> Result<()> {
    match expected {
        Some(expected) if expected != current => {
            debug!(%current, %expected, "Stale revision");
            Err(StoreError::conflict().into())
        }
        _ => Ok(()),
    }
}
