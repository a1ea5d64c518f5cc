//! Core identifier types.
//!
//! These types enforce store invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod doc_id;
mod revision;
mod store_url;

pub use doc_id::DocId;
pub use revision::Revision;
pub use store_url::StoreUrl;
