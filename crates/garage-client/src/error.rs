//! Client error types.

use thiserror::Error;

use garage_core::DocId;

/// Errors from talking to the API or working with the local cache.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The form did not validate; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The API base URL is not usable.
    #[error("invalid API URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// A document in a response was not well formed.
    #[error(transparent)]
    Core(#[from] garage_core::Error),

    /// The vehicle is not in the local cache.
    #[error("no vehicle with id '{0}'")]
    UnknownVehicle(DocId),

    /// `submit_edit` was called without a preceding `begin_edit`.
    #[error("no vehicle is being edited")]
    NoEditTarget,
}

/// Form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more fields are blank.
    #[error("Please fill in all fields!")]
    Incomplete { missing: Vec<&'static str> },

    /// The year is not a whole number.
    #[error("Year must be a number, got '{0}'")]
    InvalidYear(String),
}
