//! Error types shared by the adapter and the session store.
//!
//! ERROR HANDLING
//! ==============
//! The API reports failures as `{ "detail": ... }` where `detail` is either
//! a business-rule message or a list of field validation errors. Both shapes
//! are decoded into [`ErrorDetail`] once, here, so views only ever ask for a
//! human-readable line via [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Shown for network failures and timeouts.
pub const CONNECTIVITY_MESSAGE: &str =
    "Could not reach the server. Check your connection and that the API is running.";

/// Shown when the API answered with an error body we cannot interpret.
pub const UNKNOWN_ERROR_MESSAGE: &str = "The server returned an unexpected error.";

// =============================================================================
// ERROR DETAIL
// =============================================================================

/// One entry of a validation-error `detail` list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<Value>,
    #[serde(default)]
    pub msg: String,
}

impl FieldError {
    /// Name of the offending field.
    ///
    /// `loc` is `["body", "<field>", ...]`; the second element names the
    /// field. Shorter paths fall back to their last element.
    #[must_use]
    pub fn field(&self) -> Option<String> {
        let segment = self.loc.get(1).or_else(|| self.loc.last())?;
        match segment {
            Value::String(name) => Some(name.clone()),
            Value::Number(index) => Some(index.to_string()),
            _ => None,
        }
    }
}

/// Decoded `detail` member of an API error body.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorDetail {
    /// Business error, e.g. duplicate group name.
    Message(String),
    /// Field validation errors, in API order. Never empty.
    Validation(Vec<FieldError>),
    /// Any other body, kept verbatim for logs.
    Unknown(Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDetail {
    Message(String),
    Validation(Vec<FieldError>),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: RawDetail,
}

impl ErrorDetail {
    /// Classify an error response body.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        match ErrorBody::deserialize(body) {
            Ok(ErrorBody { detail: RawDetail::Message(message) }) => Self::Message(message),
            Ok(ErrorBody { detail: RawDetail::Validation(errors) }) if !errors.is_empty() => {
                Self::Validation(errors)
            }
            _ => Self::Unknown(body.clone()),
        }
    }

    /// Human-readable text, or `None` when the body was not understood.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Message(message) => Some(message.clone()),
            Self::Validation(errors) => errors.first().map(|first| {
                let field = first.field().unwrap_or_else(|| "field".to_owned());
                format!("Invalid field '{field}': {}", first.msg)
            }),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(&message),
            None => match self {
                Self::Unknown(Value::Null) => f.write_str("<empty body>"),
                Self::Unknown(body) => write!(f, "{body}"),
                _ => Ok(()),
            },
        }
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Failure of a single call through the HTTP adapter.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, CORS, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The adapter gave up waiting and dropped the request.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// The API answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: ErrorDetail },
    /// A 2xx body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// A request body could not be serialized.
    #[error("could not encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status, when the API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True for failures where the API was never reached.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }

    /// Text suitable for showing to the user.
    ///
    /// Connectivity problems get a fixed message, API details are rendered
    /// from the body, and anything else falls back to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) | Self::Timeout(_) => CONNECTIVITY_MESSAGE.to_owned(),
            Self::Status { detail, .. } => detail.message().unwrap_or_else(|| fallback.to_owned()),
            Self::Decode(_) | Self::Encode(_) => fallback.to_owned(),
        }
    }
}

// =============================================================================
// STORAGE & SESSION ERRORS
// =============================================================================

/// Failure to persist or remove the bearer token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No durable storage exists in this environment.
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    /// The storage exists but rejected the operation.
    #[error("token storage write failed: {0}")]
    Write(String),
}

/// Failure of a session-store operation surfaced to the caller.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// See [`ApiError::user_message`]; storage failures use `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(error) => error.user_message(fallback),
            Self::Storage(_) => fallback.to_owned(),
        }
    }

    /// The underlying API error, if any.
    #[must_use]
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            Self::Storage(_) => None,
        }
    }
}
