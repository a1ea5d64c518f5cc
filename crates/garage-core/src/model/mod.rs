//! Document and vehicle data model.
//!
//! The store is schema-agnostic: a [`Document`] is an id, a revision and an
//! arbitrary JSON object. [`Vehicle`] is the typed view clients work with.

mod document;
mod vehicle;

pub use document::{DeleteOutcome, Document, Fields, fields_from_value};
pub use vehicle::{Owner, Vehicle};
