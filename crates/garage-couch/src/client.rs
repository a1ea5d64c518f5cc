//! CouchDB HTTP client implementation.

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use garage_core::error::{Error, StoreError, TransportError};
use garage_core::{Result, StoreUrl};

use crate::endpoints::CouchErrorResponse;

/// Map a reqwest failure onto the transport error variants.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client for the CouchDB API.
///
/// Credentials embedded in the store URL are sent as basic auth on every
/// request.
#[derive(Debug, Clone)]
pub struct CouchClient {
    client: reqwest::Client,
    url: StoreUrl,
}

impl CouchClient {
    /// Create a new client for the given server URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(url: StoreUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("garage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self { client, url })
    }

    /// Returns the server URL this client is configured for.
    pub fn url(&self) -> &StoreUrl {
        &self.url
    }

    /// GET a path and decode the JSON response.
    #[instrument(skip(self), fields(server = %self.url))]
    pub async fn get<R>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("CouchDB GET");
        let response = self
            .request(Method::GET, segments)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// POST a JSON body to a path.
    #[instrument(skip(self, body), fields(server = %self.url))]
    pub async fn post<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("CouchDB POST");
        let response = self
            .request(Method::POST, segments)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// PUT a JSON body to a path.
    #[instrument(skip(self, body), fields(server = %self.url))]
    pub async fn put<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("CouchDB PUT");
        let response = self
            .request(Method::PUT, segments)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// PUT to a path with no request body.
    /// Used for database creation, which takes no body.
    #[instrument(skip(self), fields(server = %self.url))]
    pub async fn put_empty<R>(&self, segments: &[&str]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("CouchDB PUT (no body)");
        let response = self
            .request(Method::PUT, segments)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// DELETE a path.
    #[instrument(skip(self), fields(server = %self.url))]
    pub async fn delete<R>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!("CouchDB DELETE");
        let response = self
            .request(Method::DELETE, segments)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Start a request with basic auth attached when the URL carries a user.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url.endpoint(segments);
        trace!(%method, %url, "building request");

        let builder = self.client.request(method, url);
        match self.url.username() {
            Some(user) => builder.basic_auth(user, self.url.password()),
            None => builder,
        }
    }

    /// Handle a CouchDB response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "CouchDB response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport)?;
            Ok(body)
        } else {
            Err(Error::Store(self.parse_error_response(response).await))
        }
    }

    /// Parse a CouchDB error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();

        match response.json::<CouchErrorResponse>().await {
            Ok(body) => StoreError::new(status, body.error, body.reason),
            Err(_) => StoreError::new(status, None, None),
        }
    }
}
