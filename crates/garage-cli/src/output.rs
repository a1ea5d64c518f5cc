//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use garage_core::{Document, Fields};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a one-line summary card: model, brand, year and id.
pub fn card(doc: &Document) {
    println!(
        "{}  {}  {}  {}",
        text(&doc.fields, "model").bold(),
        text(&doc.fields, "brand"),
        text(&doc.fields, "year"),
        doc.id.as_str().dimmed()
    );
}

/// Print every field of a vehicle, with the owner in its own section.
pub fn detail(doc: &Document) {
    field("ID", doc.id.as_str());
    field("Revision", doc.rev.as_str());
    field("Brand", &text(&doc.fields, "brand"));
    field("Model", &text(&doc.fields, "model"));
    field("Year", &text(&doc.fields, "year"));
    field("Color", &text(&doc.fields, "color"));
    field("Engine", &text(&doc.fields, "engine"));
    field("License Plate", &text(&doc.fields, "licensePlate"));

    println!();
    println!("{}", "Owner Information".bold());
    let owner = doc.fields.get("owner").and_then(Value::as_object);
    let owner_text = |key: &str| owner.map(|o| text(o, key)).unwrap_or_default();
    field("Name", &owner_text("name"));
    field("Contact", &owner_text("contact"));
}

fn text(fields: &Fields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
