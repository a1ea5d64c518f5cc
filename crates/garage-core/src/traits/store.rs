//! Document store trait.

use async_trait::async_trait;

use crate::Result;
use crate::model::{DeleteOutcome, Document, Fields};
use crate::types::{DocId, Revision};

/// A document store holding one database of JSON documents.
///
/// Every write produces a new [`Revision`]; writes and deletes must name the
/// current revision and fail with a conflict otherwise. Lookups of absent ids
/// fail with a not-found [`StoreError`](crate::StoreError).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the database name this store operates on.
    fn database(&self) -> &str;

    /// Create the database if it does not exist.
    ///
    /// Returns `true` if the database was created, `false` if it already existed.
    async fn ensure_database(&self) -> Result<bool>;

    /// Insert a new document; the store assigns its id and first revision.
    async fn insert(&self, fields: Fields) -> Result<Document>;

    /// List every document with its full body.
    async fn list(&self) -> Result<Vec<Document>>;

    /// Fetch the current revision of a document.
    async fn get(&self, id: &DocId) -> Result<Document>;

    /// Write a new revision of an existing document.
    ///
    /// `document.rev` must be the current revision. Returns the document
    /// carrying its new revision.
    async fn put(&self, document: &Document) -> Result<Document>;

    /// Delete the document at the given revision.
    async fn destroy(&self, id: &DocId, rev: &Revision) -> Result<DeleteOutcome>;
}
