// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, error synthesis and the
// `{ success, data }` envelope. Resource endpoints (requests, rooms, guests,
// bookings) live in their own modules as inherent methods.

use std::borrow::Cow;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::Envelope;

/// Error body shape the backend uses for non-2xx responses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Async client for the hotel backend REST API.
///
/// Cheap to clone: `reqwest::Client` is internally reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:3003/api`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    /// Create a client from a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join `endpoint` under the base path.
    ///
    /// `Url::join` would drop the last base segment (`/api`), so the two
    /// halves are concatenated with exactly one slash between them.
    pub(crate) fn url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{endpoint}"))?)
    }

    // ── Transport ────────────────────────────────────────────────────

    /// Issue a request and decode the raw JSON response body.
    ///
    /// `body`, when present, is sent as JSON. Non-2xx statuses become
    /// [`Error::Http`], connection failures become [`Error::Network`].
    /// Nothing is retried.
    pub async fn call<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(endpoint)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        self.handle_response(resp).await
    }

    /// GET and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        self.call::<Envelope<T>, ()>(Method::GET, endpoint, None)
            .await?
            .into_data()
    }

    /// POST a JSON body and unwrap the envelope.
    pub(crate) async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.call::<Envelope<T>, B>(Method::POST, endpoint, Some(body))
            .await?
            .into_data()
    }

    /// PUT with an optional JSON body and unwrap the envelope.
    pub(crate) async fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.call::<Envelope<T>, B>(Method::PUT, endpoint, body)
            .await?
            .into_data()
    }

    /// DELETE, checking only the envelope's `success` flag.
    pub(crate) async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        self.call::<Envelope<serde_json::Value>, ()>(Method::DELETE, endpoint, None)
            .await?
            .into_unit()
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body
                .char_indices()
                .nth(200)
                .map_or(body.as_str(), |(idx, _)| &body[..idx]);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn parse_error(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorBody>(&raw).ok();

        let message = parsed
            .and_then(|b| non_blank(b.error).or_else(|| non_blank(b.message)))
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// Treat empty and whitespace-only messages as absent.
pub(crate) fn non_blank(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Percent-encode an id so it always occupies exactly one path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
