//! garage-file - Filesystem-backed document store.
//!
//! Stores one JSON file per document and issues CouchDB-style revisions, so
//! the API server can run without a database server during development and
//! in tests.

mod store;

pub use store::FileStore;
