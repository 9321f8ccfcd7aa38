// ── Core error types ──
//
// Errors surfaced by frontdesk-core. Transport failures that the backend
// (or the network) reported collapse into `Api`, which keeps the numeric
// status so callers can tell a refused connection (status 0) from a
// rejected transition (4xx). Everything else is an unexpected failure.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    /// HTTP or network failure. `status` is `0` for network failures.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for the typed API error class (HTTP status or network failure).
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// `true` when the backend could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api { status: 0, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message to show a user for a failed operation: the API error's
    /// own message, or `fallback` for anything unexpected.
    pub fn user_message(&self, fallback: &str) -> String {
        if self.is_api_error() {
            self.to_string()
        } else {
            fallback.to_owned()
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<frontdesk_api::Error> for CoreError {
    fn from(err: frontdesk_api::Error) -> Self {
        match err {
            frontdesk_api::Error::Http { status, message } => CoreError::Api { status, message },
            frontdesk_api::Error::Network(_) => CoreError::Api {
                status: 0,
                message: err.to_string(),
            },
            frontdesk_api::Error::Rejected { message } => CoreError::Rejected { message },
            frontdesk_api::Error::Deserialization { message, .. } => {
                CoreError::Internal(format!("unexpected response: {message}"))
            }
            frontdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid backend URL: {e}"),
            },
            frontdesk_api::Error::Client(message) => CoreError::Config { message },
        }
    }
}
