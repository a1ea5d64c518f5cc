//! HTTP client for the inventory API.

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};
use url::Url;

use garage_core::{DeleteOutcome, DocId, Document, Revision, Vehicle};

use crate::error::ClientError;

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the five inventory routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the API at `base` (e.g. `http://localhost:4000`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute http(s) URL or the HTTP
    /// client cannot be constructed.
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            value: base.to_string(),
            reason,
        };

        let url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("garage/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base: url, http })
    }

    /// Returns the API base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Fetch every record.
    #[instrument(skip(self))]
    pub async fn read_all(&self) -> Result<Vec<Document>, ClientError> {
        let response = self.request(Method::GET, &["readall"]).send().await?;
        self.handle_response(response).await
    }

    /// Fetch one record.
    #[instrument(skip(self))]
    pub async fn read_one(&self, id: &DocId) -> Result<Document, ClientError> {
        let response = self
            .request(Method::GET, &["read", id.as_str()])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Store a new record.
    #[instrument(skip(self, vehicle))]
    pub async fn create(&self, vehicle: &Vehicle) -> Result<Document, ClientError> {
        let response = self
            .request(Method::POST, &["create"])
            .json(vehicle)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Overwrite the fields of a record with those of `vehicle`.
    ///
    /// With `rev` set the server rejects the write unless the record is still
    /// at that revision.
    #[instrument(skip(self, vehicle))]
    pub async fn update(
        &self,
        id: &DocId,
        vehicle: &Vehicle,
        rev: Option<&Revision>,
    ) -> Result<Document, ClientError> {
        let response = self
            .request(Method::PUT, &["update", id.as_str()])
            .query(&rev_query(rev))
            .json(vehicle)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        id: &DocId,
        rev: Option<&Revision>,
    ) -> Result<DeleteOutcome, ClientError> {
        let response = self
            .request(Method::DELETE, &["delete", id.as_str()])
            .query(&rev_query(rev))
            .send()
            .await?;
        self.handle_response(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // new() rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "API request");
        self.http.request(method, url)
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<R, ClientError> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) if text.is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => text,
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn rev_query(rev: Option<&Revision>) -> Vec<(&'static str, &str)> {
    rev.map(|rev| vec![("rev", rev.as_str())]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_encoded_segments() {
        let client = ApiClient::new("http://localhost:4000").unwrap();
        assert_eq!(
            client.endpoint(&["read", "a b"]).as_str(),
            "http://localhost:4000/read/a%20b"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let client = ApiClient::new("http://example.com/garage/").unwrap();
        assert_eq!(
            client.endpoint(&["readall"]).as_str(),
            "http://example.com/garage/readall"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            ApiClient::new("file:///tmp"),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(ApiClient::new("not a url").is_err());
    }
}
