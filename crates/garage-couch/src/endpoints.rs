//! CouchDB request and response bodies.

use serde::Deserialize;
use serde_json::Value;

/// Response to a document write (`POST /{db}`, `PUT /{db}/{id}`, `DELETE`).
#[derive(Debug, Deserialize)]
pub struct WriteResponse {
    #[allow(dead_code)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

/// Response to `PUT /{db}`.
#[derive(Debug, Deserialize)]
pub struct OkResponse {
    #[allow(dead_code)]
    pub ok: bool,
}

/// Response to `GET /{db}/_all_docs?include_docs=true`.
#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

/// One row of `_all_docs`.
#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    /// Present when `include_docs=true`; null for rows the server could not load.
    #[serde(default)]
    pub doc: Option<Value>,
}

/// CouchDB error body.
#[derive(Debug, Deserialize)]
pub struct CouchErrorResponse {
    pub error: Option<String>,
    pub reason: Option<String>,
}
