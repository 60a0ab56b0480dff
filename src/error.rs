//! Error types for the HomeServe client

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for the HomeServe client
pub type Result<T> = std::result::Result<T, Error>;

/// HomeServe client errors
///
/// Transport failures are classified once, at the transport boundary, into
/// the variants below. The cache layer contributes no variants of its own:
/// a miss-then-fetch failure surfaces the underlying transport error
/// unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// Request never produced a response (DNS, connect, TLS, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Transport timeout ceiling was hit
    #[error("request timed out: {0}")]
    Timeout(String),

    /// HTTP 401
    #[error("unauthorized: {detail}")]
    Unauthorized {
        /// Server-provided detail, or a default
        detail: String,
    },

    /// HTTP 403
    #[error("access denied: {detail}")]
    Forbidden {
        /// Server-provided detail, or a default
        detail: String,
    },

    /// HTTP 404
    #[error("not found: {path}")]
    NotFound {
        /// Request path that produced the 404
        path: String,
    },

    /// HTTP 422 with structured field errors
    #[error("validation failed: {detail}")]
    Validation {
        /// Server-provided detail, or a default
        detail: String,
        /// Per-field error messages, keyed by field name
        errors: BTreeMap<String, FieldErrorMessages>,
    },

    /// HTTP 5xx
    #[error("server error (HTTP {status}): {detail}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server-provided detail, or a default
        detail: String,
    },

    /// Any other non-success HTTP status (e.g. 400)
    #[error("API error (HTTP {status}): {detail}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided detail, or a default
        detail: String,
    },

    /// Request abandoned pre-flight because the stored token has expired
    #[error("session expired")]
    SessionExpired,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Response body did not have the expected shape
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error payload returned by the platform API
///
/// The backend emits `{status, status_code, detail, error_type}` and, for
/// validation failures, an `errors` map of field name to message(s). Older
/// endpoints use `message` instead of `detail`; both are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error detail
    #[serde(default, alias = "message")]
    pub detail: Option<String>,

    /// Field-level validation errors
    #[serde(default)]
    pub errors: Option<BTreeMap<String, FieldErrorMessages>>,

    /// Machine-readable error tag
    #[serde(default)]
    pub error_type: Option<String>,
}

/// One field's validation messages: either a single string or a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldErrorMessages {
    /// Single message
    One(String),
    /// Multiple messages; the first is shown to the user
    Many(Vec<String>),
}

impl FieldErrorMessages {
    /// First (or only) message for this field
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(message) => Some(message.as_str()),
            Self::Many(messages) => messages.first().map(String::as_str),
        }
    }
}

impl ErrorBody {
    /// Parse an error body from a raw response, tolerating non-JSON payloads
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

impl Error {
    /// Classify a reqwest failure as timeout or network error
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }

    /// Classify a non-success HTTP status and its parsed error body
    #[must_use]
    pub fn from_status(status: u16, path: &str, body: ErrorBody) -> Self {
        let detail = |fallback: &str| {
            body.detail
                .clone()
                .unwrap_or_else(|| fallback.to_string())
        };

        match status {
            401 => Self::Unauthorized {
                detail: detail("Please login again"),
            },
            403 => Self::Forbidden {
                detail: detail("You do not have permission to perform this action"),
            },
            404 => Self::NotFound {
                path: path.to_string(),
            },
            422 => Self::Validation {
                detail: detail("Validation failed"),
                errors: body.errors.clone().unwrap_or_default(),
            },
            500.. => Self::Server {
                status,
                detail: detail("An unexpected error occurred. Please try again later."),
            },
            _ => Self::Api {
                status,
                detail: detail("Request failed"),
            },
        }
    }

    /// First field-level message of a validation error, if any
    ///
    /// Fields are ordered by name, so the reported message is deterministic
    /// regardless of the order the server serialized them in.
    pub fn first_field_error(&self) -> Option<&str> {
        match self {
            Self::Validation { errors, .. } => errors.values().next().and_then(FieldErrorMessages::first),
            _ => None,
        }
    }

    /// HTTP status code carried by this error, if it came from a response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
