//! CouchDB-backed document store.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use garage_core::{
    DeleteOutcome, DocId, Document, DocumentStore, Fields, Result, Revision, StoreUrl,
};

use crate::client::CouchClient;
use crate::endpoints::{AllDocsResponse, OkResponse, WriteResponse};

/// Path segment listing every document.
const ALL_DOCS: &str = "_all_docs";

/// A document store backed by one CouchDB database.
#[derive(Debug, Clone)]
pub struct CouchStore {
    client: CouchClient,
    database: String,
}

impl CouchStore {
    /// Create a store for `database` on the server at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(url: StoreUrl, database: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: CouchClient::new(url)?,
            database: database.into(),
        })
    }

    fn written(&self, response: WriteResponse, fields: Fields) -> Result<Document> {
        Ok(Document::new(
            DocId::new(response.id)?,
            Revision::new(response.rev)?,
            fields,
        ))
    }
}

#[async_trait]
impl DocumentStore for CouchStore {
    fn database(&self) -> &str {
        &self.database
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn ensure_database(&self) -> Result<bool> {
        match self
            .client
            .put_empty::<OkResponse>(&[self.database.as_str()])
            .await
        {
            Ok(_) => {
                debug!("Created database");
                Ok(true)
            }
            // 412 file_exists: the database is already there
            Err(err) if err.as_store().is_some_and(|e| e.status == 412) => {
                debug!("Database already exists");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, fields), fields(db = %self.database))]
    async fn insert(&self, fields: Fields) -> Result<Document> {
        debug!("Inserting document via CouchDB");

        let response: WriteResponse = self
            .client
            .post(&[self.database.as_str()], &fields)
            .await?;

        self.written(response, fields)
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn list(&self) -> Result<Vec<Document>> {
        debug!("Listing documents via CouchDB");

        let response: AllDocsResponse = self
            .client
            .get(
                &[self.database.as_str(), ALL_DOCS],
                &[("include_docs", "true")],
            )
            .await?;

        let mut documents = Vec::with_capacity(response.rows.len());
        for row in response.rows {
            // Design documents live in the same keyspace; they are not records.
            if row.id.starts_with('_') {
                continue;
            }
            match row.doc {
                Some(doc @ Value::Object(_)) => documents.push(serde_json::from_value(doc)?),
                _ => warn!(id = %row.id, "Row without document body, skipping"),
            }
        }

        Ok(documents)
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn get(&self, id: &DocId) -> Result<Document> {
        debug!(id = %id, "Getting document via CouchDB");

        let value: Value = self
            .client
            .get(&[self.database.as_str(), id.as_str()], &[])
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(self, document), fields(db = %self.database, id = %document.id))]
    async fn put(&self, document: &Document) -> Result<Document> {
        debug!(rev = %document.rev, "Writing document via CouchDB");

        let response: WriteResponse = self
            .client
            .put(
                &[self.database.as_str(), document.id.as_str()],
                &document.to_value(),
            )
            .await?;

        self.written(response, document.fields.clone())
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn destroy(&self, id: &DocId, rev: &Revision) -> Result<DeleteOutcome> {
        debug!(id = %id, rev = %rev, "Deleting document via CouchDB");

        let response: WriteResponse = self
            .client
            .delete(
                &[self.database.as_str(), id.as_str()],
                &[("rev", rev.as_str())],
            )
            .await?;

        Ok(DeleteOutcome {
            ok: true,
            id: DocId::new(response.id)?,
            rev: Revision::new(response.rev)?,
        })
    }
}
