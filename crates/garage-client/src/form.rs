//! Vehicle form state and validation.

use serde_json::Value;

use garage_core::{Document, Fields, Owner, Vehicle};

use crate::error::FormError;

/// The editable form behind "add" and "edit".
///
/// Every field is free text until [`validate`](VehicleForm::validate) turns
/// the form into a [`Vehicle`]. The default value is the blank create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub engine: String,
    pub license_plate: String,
    pub owner_name: String,
    pub owner_contact: String,
}

impl VehicleForm {
    /// Pre-fill the form from a stored record.
    ///
    /// Missing fields are left blank; numbers are rendered as text.
    pub fn from_document(doc: &Document) -> Self {
        let owner = doc.fields.get("owner").and_then(Value::as_object);
        let owner_text = |key: &str| owner.map(|o| text(o, key)).unwrap_or_default();

        Self {
            brand: text(&doc.fields, "brand"),
            model: text(&doc.fields, "model"),
            year: text(&doc.fields, "year"),
            color: text(&doc.fields, "color"),
            engine: text(&doc.fields, "engine"),
            license_plate: text(&doc.fields, "licensePlate"),
            owner_name: owner_text("name"),
            owner_contact: owner_text("contact"),
        }
    }

    /// Labels of the fields that are blank after trimming.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("brand", &self.brand),
            ("model", &self.model),
            ("year", &self.year),
            ("color", &self.color),
            ("engine", &self.engine),
            ("license plate", &self.license_plate),
            ("owner name", &self.owner_name),
            ("owner contact", &self.owner_contact),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    /// Check the form and build the record it describes.
    ///
    /// # Errors
    ///
    /// [`FormError::Incomplete`] if any field is blank, otherwise
    /// [`FormError::InvalidYear`] if the year is not a whole number.
    pub fn validate(&self) -> Result<Vehicle, FormError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(FormError::Incomplete { missing });
        }

        let year = self
            .year
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidYear(self.year.trim().to_string()))?;

        Ok(Vehicle {
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year,
            color: self.color.trim().to_string(),
            engine: self.engine.trim().to_string(),
            license_plate: self.license_plate.trim().to_string(),
            owner: Owner {
                name: self.owner_name.trim().to_string(),
                contact: self.owner_contact.trim().to_string(),
            },
        })
    }
}

fn text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
