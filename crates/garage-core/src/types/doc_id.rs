//! Document identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated document identifier.
///
/// Identifiers are assigned by the store when a document is created and never
/// change afterwards. Ids beginning with `_` are reserved by the store for
/// special endpoints (`_all_docs`, `_design/...`) and are rejected here.
///
/// # Example
///
/// ```
/// use garage_core::DocId;
///
/// let id = DocId::new("5d1f7a0c2b8e4e3c9a1b7f6e2d4c8a90").unwrap();
/// assert_eq!(id.as_str(), "5d1f7a0c2b8e4e3c9a1b7f6e2d4c8a90");
/// assert!(DocId::new("_all_docs").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocId(String);

impl DocId {
    /// Create a new document id, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or reserved.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::DocId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.starts_with('_') {
            return Err(InvalidInputError::DocId {
                value: s.to_string(),
                reason: "ids starting with '_' are reserved".to_string(),
            }
            .into());
        }

        if s.chars().any(char::is_control) {
            return Err(InvalidInputError::DocId {
                value: s.to_string(),
                reason: "contains control characters".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DocId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
