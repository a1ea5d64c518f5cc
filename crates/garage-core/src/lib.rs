//! garage-core - Core types and traits for the my-garage vehicle inventory.

pub mod error;
pub mod model;
pub mod traits;
pub mod types;

pub use error::{Error, StoreError};
pub use model::{DeleteOutcome, Document, Fields, Owner, Vehicle};
pub use traits::DocumentStore;
pub use types::{DocId, Revision, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
