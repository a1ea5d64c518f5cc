//! garage-couch - CouchDB-backed document store.

mod client;
mod endpoints;
mod store;

pub use client::CouchClient;
pub use store::CouchStore;
