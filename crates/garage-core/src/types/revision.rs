//! Revision token type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque revision token identifying one version of a document.
///
/// Stores issue tokens of the form `<generation>-<hash>`; the token changes on
/// every write and must be presented to overwrite or delete that version.
/// Only non-emptiness is enforced, the rest is treated as opaque.
///
/// # Example
///
/// ```
/// use garage_core::Revision;
///
/// let rev = Revision::new("2-7051cbe5c8faecd085a3fa619e6e6337").unwrap();
/// assert_eq!(rev.generation(), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision(String);

impl Revision {
    /// Create a revision token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or contains whitespace.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::Revision {
                value: s,
                reason: "must be a non-empty token without whitespace".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Build a token from a generation number and a content hash.
    pub fn from_parts(generation: u64, hash: &str) -> Self {
        Self(format!("{}-{}", generation, hash))
    }

    /// Returns the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the generation prefix, if the token has one.
    pub fn generation(&self) -> Option<u64> {
        self.0.split_once('-')?.0.parse().ok()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Revision> for String {
    fn from(rev: Revision) -> Self {
        rev.0
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
