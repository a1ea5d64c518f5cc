//! Vehicle record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Fields;
use crate::Result;
use crate::error::InvalidInputError;

/// Owner details attached to a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub contact: String,
}

/// A vehicle record as exchanged with the API.
///
/// Field names follow the JSON wire format (`licensePlate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub brand: String,
    pub model: String,
    /// Model year. Accepts a JSON number or a numeric string on input.
    #[serde(deserialize_with = "deserialize_year")]
    pub year: u16,
    pub color: String,
    pub engine: String,
    pub license_plate: String,
    pub owner: Owner,
}

impl Vehicle {
    /// Returns the record as a store field set.
    pub fn to_fields(&self) -> Result<Fields> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(InvalidInputError::Document {
                message: format!("expected a JSON object, got {}", other),
            }
            .into()),
        }
    }
}

fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u16),
        Text(String),
    }

    match Year::deserialize(deserializer)? {
        Year::Number(year) => Ok(year),
        Year::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid year '{}'", text))),
    }
}
