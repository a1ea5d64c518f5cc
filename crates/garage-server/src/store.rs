//! Backend selection from a store URL.

use async_trait::async_trait;

use garage_core::{
    DeleteOutcome, DocId, Document, DocumentStore, Fields, Result, Revision, StoreUrl,
};
use garage_couch::CouchStore;
use garage_file::FileStore;

/// The store behind the server, chosen by URL scheme.
#[derive(Debug, Clone)]
pub enum AnyStore {
    Couch(CouchStore),
    File(FileStore),
}

impl AnyStore {
    /// Open the store for `database`: `file://` URLs select the file
    /// backend, anything else is treated as a CouchDB server.
    ///
    /// # Errors
    ///
    /// Returns an error if the CouchDB client cannot be constructed.
    pub fn open(url: &StoreUrl, database: &str) -> Result<Self> {
        match url.to_file_path() {
            Some(path) => Ok(AnyStore::File(FileStore::new(path, database))),
            None => Ok(AnyStore::Couch(CouchStore::new(url.clone(), database)?)),
        }
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyStore::Couch(_) => "couchdb",
            AnyStore::File(_) => "file",
        }
    }
}

#[async_trait]
impl DocumentStore for AnyStore {
    fn database(&self) -> &str {
        match self {
            AnyStore::Couch(store) => store.database(),
            AnyStore::File(store) => store.database(),
        }
    }

    async fn ensure_database(&self) -> Result<bool> {
        match self {
            AnyStore::Couch(store) => store.ensure_database().await,
            AnyStore::File(store) => store.ensure_database().await,
        }
    }

    async fn insert(&self, fields: Fields) -> Result<Document> {
        match self {
            AnyStore::Couch(store) => store.insert(fields).await,
            AnyStore::File(store) => store.insert(fields).await,
        }
    }

    async fn list(&self) -> Result<Vec<Document>> {
        match self {
            AnyStore::Couch(store) => store.list().await,
            AnyStore::File(store) => store.list().await,
        }
    }

    async fn get(&self, id: &DocId) -> Result<Document> {
        match self {
            AnyStore::Couch(store) => store.get(id).await,
            AnyStore::File(store) => store.get(id).await,
        }
    }

    async fn put(&self, document: &Document) -> Result<Document> {
        match self {
            AnyStore::Couch(store) => store.put(document).await,
            AnyStore::File(store) => store.put(document).await,
        }
    }

    async fn destroy(&self, id: &DocId, rev: &Revision) -> Result<DeleteOutcome> {
        match self {
            AnyStore::Couch(store) => store.destroy(id, rev).await,
            AnyStore::File(store) => store.destroy(id, rev).await,
        }
    }
}
