//! Filesystem storage for the file-backed document store.

use std::collections::hash_map::DefaultHasher;
use std::fs::{self, File, OpenOptions};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use garage_core::{
    DeleteOutcome, DocId, Document, DocumentStore, Fields, Result, Revision, StoreError,
};

/// Marker field of a deleted document.
const DELETED: &str = "_deleted";

/// Exclusive lock on a database directory, released on drop.
struct StoreLock(File);

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.0) {
            warn!(error = %e, "Failed to release store lock");
        }
    }
}

/// Filesystem-backed document store.
///
/// Layout under the root directory:
///
/// ```text
/// <root>/<database>/store.lock
/// <root>/<database>/docs/<id>.json
/// ```
///
/// Deleted documents are kept as tombstones so that a later write or delete
/// against them fails the same way it does on CouchDB.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    database: String,
}

impl FileStore {
    /// Create a new file store for `database` under the given root directory.
    pub fn new(root: impl AsRef<Path>, database: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            database: database.into(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the database directory.
    fn database_dir(&self) -> PathBuf {
        self.root.join(&self.database)
    }

    /// Get the documents directory.
    fn docs_dir(&self) -> PathBuf {
        self.database_dir().join("docs")
    }

    /// Get the lock file path.
    fn lock_path(&self) -> PathBuf {
        self.database_dir().join("store.lock")
    }

    /// Convert a document id into a filesystem-safe file name.
    ///
    /// Ids made only of `[A-Za-z0-9._-]` are used as-is; anything else is
    /// hex-encoded behind a `~`, which never appears in a plain name.
    fn file_name(id: &DocId) -> String {
        let s = id.as_str();
        let plain = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

        if plain {
            format!("{}.json", s)
        } else {
            let hex: String = s.bytes().map(|b| format!("{:02x}", b)).collect();
            format!("~{}.json", hex)
        }
    }

    /// Get the path for a specific document.
    fn doc_path(&self, id: &DocId) -> PathBuf {
        self.docs_dir().join(Self::file_name(id))
    }

    /// Generate a new document id (32 hex chars, like CouchDB's uuids).
    fn generate_id(&self) -> Result<DocId> {
        DocId::new(Uuid::new_v4().simple().to_string())
    }

    /// Generate the revision for a given generation and body.
    fn generate_rev(&self, generation: u64, fields: &Fields) -> Revision {
        let mut hasher = DefaultHasher::new();
        generation.hash(&mut hasher);
        Value::Object(fields.clone()).to_string().hash(&mut hasher);
        Revision::from_parts(generation, &format!("{:016x}", hasher.finish()))
    }

    fn require_database(&self) -> Result<()> {
        if self.docs_dir().is_dir() {
            Ok(())
        } else {
            Err(StoreError::not_found("Database does not exist.").into())
        }
    }

    fn lock(&self) -> Result<StoreLock> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        file.lock_exclusive()?;

        Ok(StoreLock(file))
    }

    fn is_tombstone(doc: &Document) -> bool {
        doc.fields.get(DELETED) == Some(&Value::Bool(true))
    }

    /// Read a document file, tombstones included.
    fn read(&self, id: &DocId) -> Result<Option<Document>> {
        let path = self.doc_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Read a live document, failing with not-found for missing or deleted ids.
    fn read_live(&self, id: &DocId) -> Result<Document> {
        match self.read(id)? {
            Some(doc) if Self::is_tombstone(&doc) => Err(StoreError::not_found("deleted").into()),
            Some(doc) => Ok(doc),
            None => Err(StoreError::not_found("missing").into()),
        }
    }

    /// Write a document atomically (temp file + rename).
    fn write(&self, doc: &Document) -> Result<()> {
        let path = self.doc_path(&doc.id);
        let content = serde_json::to_string_pretty(doc)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn next_rev(&self, current: &Revision, fields: &Fields) -> Revision {
        let generation = current.generation().unwrap_or(0) + 1;
        self.generate_rev(generation, fields)
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn database(&self) -> &str {
        &self.database
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn ensure_database(&self) -> Result<bool> {
        let docs_dir = self.docs_dir();
        if docs_dir.is_dir() {
            debug!("Database already exists");
            return Ok(false);
        }

        fs::create_dir_all(&docs_dir)?;
        debug!(path = %docs_dir.display(), "Created database");

        Ok(true)
    }

    #[instrument(skip(self, fields), fields(db = %self.database))]
    async fn insert(&self, fields: Fields) -> Result<Document> {
        self.require_database()?;
        let _lock = self.lock()?;

        let id = self.generate_id()?;
        let mut doc = Document::new(id, Revision::from_parts(1, "0"), fields);
        doc.fields.remove(DELETED);
        doc.rev = self.generate_rev(1, &doc.fields);

        self.write(&doc)?;
        debug!(id = %doc.id, rev = %doc.rev, "Inserted document");

        Ok(doc)
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn list(&self) -> Result<Vec<Document>> {
        self.require_database()?;

        let mut documents = Vec::new();

        for entry in fs::read_dir(self.docs_dir())? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<Document>(&content) {
                Ok(doc) if Self::is_tombstone(&doc) => {}
                Ok(doc) => documents.push(doc),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable document"),
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(documents)
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn get(&self, id: &DocId) -> Result<Document> {
        self.require_database()?;
        self.read_live(id)
    }

    #[instrument(skip(self, document), fields(db = %self.database, id = %document.id))]
    async fn put(&self, document: &Document) -> Result<Document> {
        self.require_database()?;
        let _lock = self.lock()?;

        let current = self.read_live(&document.id)?;
        if current.rev != document.rev {
            debug!(current = %current.rev, given = %document.rev, "Stale revision");
            return Err(StoreError::conflict().into());
        }

        let mut next = Document::new(
            document.id.clone(),
            document.rev.clone(),
            document.fields.clone(),
        );
        next.fields.remove(DELETED);
        next.rev = self.next_rev(&current.rev, &next.fields);

        self.write(&next)?;
        debug!(rev = %next.rev, "Wrote document");

        Ok(next)
    }

    #[instrument(skip(self), fields(db = %self.database))]
    async fn destroy(&self, id: &DocId, rev: &Revision) -> Result<DeleteOutcome> {
        self.require_database()?;
        let _lock = self.lock()?;

        let current = self.read_live(id)?;
        if &current.rev != rev {
            debug!(current = %current.rev, given = %rev, "Stale revision");
            return Err(StoreError::conflict().into());
        }

        let mut tombstone = Fields::new();
        tombstone.insert(DELETED.to_string(), Value::Bool(true));
        let tombstone_rev = self.next_rev(&current.rev, &tombstone);

        self.write(&Document::new(id.clone(), tombstone_rev.clone(), tombstone))?;
        debug!(id = %id, "Deleted document");

        Ok(DeleteOutcome {
            ok: true,
            id: id.clone(),
            rev: tombstone_rev,
        })
    }
}
