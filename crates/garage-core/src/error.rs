//! Error types for the garage crates.
//!
//! A single [`Error`] covers every way a store operation can fail. Callers
//! that only need a message (the API server) use its `Display` output; callers
//! that care about the cause match on the variant.

use std::fmt;
use thiserror::Error;

/// The unified error type for store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection refused, DNS, malformed response).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Errors reported by the document store itself.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad id, bad revision, bad store URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the store error, if this is one.
    pub fn as_store(&self) -> Option<&StoreError> {
        match self {
            Error::Store(err) => Some(err),
            _ => None,
        }
    }

    /// True if the store reported the document as missing.
    pub fn is_not_found(&self) -> bool {
        self.as_store().is_some_and(StoreError::is_not_found)
    }

    /// True if the store rejected a write because of a stale revision.
    pub fn is_conflict(&self) -> bool {
        self.as_store().is_some_and(StoreError::is_conflict)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the store failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Local filesystem error (file-backed store).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Generic HTTP error, including undecodable response bodies.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::Io {
            message: err.to_string(),
        })
    }
}

/// An error response from the document store.
///
/// Mirrors the CouchDB error body `{"error": ..., "reason": ...}` together with
/// the HTTP status it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// HTTP status code.
    pub status: u16,
    /// Store error code, e.g. `not_found` or `conflict`.
    pub error: Option<String>,
    /// Human readable reason, e.g. `missing` or `deleted`.
    pub reason: Option<String>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref reason) = self.reason {
            write!(f, ": {}", reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    /// Create a new store error.
    pub fn new(status: u16, error: Option<String>, reason: Option<String>) -> Self {
        Self {
            status,
            error,
            reason,
        }
    }

    /// A 404 for a document that does not exist.
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(404, Some("not_found".to_string()), Some(reason.into()))
    }

    /// A 409 for a write against a revision that is no longer current.
    pub fn conflict() -> Self {
        Self::new(
            409,
            Some("conflict".to_string()),
            Some("Document update conflict.".to_string()),
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.error.as_deref() == Some("not_found")
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409 || self.error.as_deref() == Some("conflict")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid document id.
    #[error("invalid document id '{value}': {reason}")]
    DocId { value: String, reason: String },

    /// Invalid revision token.
    #[error("invalid revision '{value}': {reason}")]
    Revision { value: String, reason: String },

    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// Document body is not what the operation expects.
    #[error("invalid document: {message}")]
    Document { message: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(InvalidInputError::Document {
            message: err.to_string(),
        })
    }
}
