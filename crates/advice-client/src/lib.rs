//! advice-client: HTTP client for the advice `/entries` API.
//!
//! [`EntriesClient`] speaks plain HTTP/1.1 through a pooled `hyper` client.
//! It performs no retries: every failure is reported once and the caller
//! decides whether to surface it.

use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{ACCEPT, CONTENT_TYPE},
    Method, Request, StatusCode, Uri,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use advice_core::Entry;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for `GET /entries` and `POST /entries`.
#[derive(Clone)]
pub struct EntriesClient {
    http: Client<HttpConnector, Full<Bytes>>,
    entries_uri: Uri,
}

impl EntriesClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder(TokioExecutor::new()).build_http(),
            entries_uri: entries_uri(base_url)?,
        })
    }

    /// Fetch every entry, newest first.
    pub async fn list(&self) -> Result<Vec<Entry>, ClientError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.entries_uri.clone())
            .header(ACCEPT, "application/json")
            .body(Full::new(Bytes::new()))?;

        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Submit `text` as a new entry and return what the server stored.
    pub async fn create(&self, text: &str) -> Result<Entry, ClientError> {
        let payload = serde_json::json!({ "text": text }).to_string();
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.entries_uri.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload)))?;

        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send `request` and return the body of a 2xx response.
    async fn send(&self, request: Request<Full<Bytes>>) -> Result<Bytes, ClientError> {
        let method = request.method().clone();
        let response = self.http.request(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        debug!(%method, %status, bytes = body.len(), "entries api response");

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                message: error_message(status, &body),
            });
        }
        Ok(body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// The `{"error": ...}` message of a failed response, or the status reason
/// when the body has none.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        })
}

fn entries_uri(base_url: &str) -> Result<Uri, ClientError> {
    let invalid = |reason: &str| ClientError::InvalidUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let uri: Uri = format!("{}/entries", base_url.trim().trim_end_matches('/'))
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;

    match uri.scheme_str() {
        Some("http") => {}
        Some(other) => return Err(invalid(&format!("unsupported scheme {other}"))),
        None => return Err(invalid("missing scheme")),
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(uri)
}
