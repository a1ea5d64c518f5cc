//! Stored document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::types::{DocId, Revision};

use super::Vehicle;

/// Field set of a document body: any JSON object.
pub type Fields = Map<String, Value>;

/// Keys owned by the store; never taken from caller-supplied bodies.
const RESERVED_KEYS: [&str; 2] = ["_id", "_rev"];

/// Convert a JSON value into a field set.
///
/// # Errors
///
/// Returns an error if the value is not a JSON object.
pub fn fields_from_value(value: Value) -> Result<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidInput(InvalidInputError::Document {
            message: format!("expected a JSON object, got {}", kind(&other)),
        })),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A document as held by the store.
///
/// Serializes to the store's wire shape: the body fields flattened alongside
/// `_id` and `_rev`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: DocId,

    /// Revision token of this version.
    #[serde(rename = "_rev")]
    pub rev: Revision,

    /// Body fields.
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Assemble a document, dropping any reserved keys from `fields`.
    pub fn new(id: DocId, rev: Revision, mut fields: Fields) -> Self {
        strip_reserved(&mut fields);
        Self { id, rev, fields }
    }

    /// Shallow-merge `patch` over this document's fields.
    ///
    /// Keys present in the patch replace existing values; nested objects are
    /// replaced wholesale, not merged. `_id` and `_rev` in the patch are ignored.
    pub fn merge(&mut self, patch: Fields) {
        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// Returns a copy with `patch` merged in.
    pub fn merged(&self, patch: Fields) -> Self {
        let mut doc = self.clone();
        doc.merge(patch);
        doc
    }

    /// Interpret the body as a vehicle record.
    ///
    /// # Errors
    ///
    /// Returns an error if required vehicle fields are missing or mistyped.
    pub fn to_vehicle(&self) -> Result<Vehicle> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }

    /// Returns the document as a JSON value including `_id` and `_rev`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 2);
        map.insert("_id".to_string(), Value::String(self.id.to_string()));
        map.insert("_rev".to_string(), Value::String(self.rev.to_string()));
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

/// Remove store-owned keys from a caller-supplied body.
pub(crate) fn strip_reserved(fields: &mut Fields) {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
}

/// Result of deleting a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Always true for a successful deletion.
    pub ok: bool,
    /// Id of the deleted document.
    pub id: DocId,
    /// Revision of the deletion marker.
    pub rev: Revision,
}
