use thiserror::Error;

/// Top-level error type for the `frontdesk-api` crate.
///
/// `Http` and `Network` together form the typed API error the rest of the
/// workspace recognises: both carry a numeric status (network failures use
/// status `0`) and a human-readable message. Everything else is treated as
/// an unexpected failure by `frontdesk-core`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Typed API errors ────────────────────────────────────────────
    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the backend's `error` (or `message`) field when the body
    /// parses as JSON, otherwise `"HTTP <status>: <reason>"`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Connection-level failure (DNS, refused connection, timeout, truncated body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // ── Envelope ────────────────────────────────────────────────────
    /// 2xx response whose `{success, data}` envelope reports `success: false`.
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Setup ───────────────────────────────────────────────────────
    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Numeric status of a typed API error: the HTTP status, or `0` for
    /// network-level failures. `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) => Some(0),
            _ => None,
        }
    }

    /// Returns `true` for connection-level failures (status `0`).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns `true` for the typed API error class (HTTP or network).
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Network(_))
    }

    /// Returns `true` if the backend reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}
