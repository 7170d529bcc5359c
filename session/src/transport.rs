//! Runtime seam between the adapter and an actual HTTP stack.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` decides what to send and how to read the answer; a
//! [`Transport`] only moves bytes. The terminal client plugs in `reqwest`
//! on tokio, the browser build plugs in `gloo-net`, and tests plug in
//! scripted stubs.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use serde_json::Value;

/// HTTP verbs used by the forum API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    pub body: Option<Value>,
    /// Bearer token to send, already chosen by the adapter.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Value for the `Authorization` header, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_deref().map(bearer_header)
    }
}

/// A raw response as seen by the adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `Null` for empty bodies (e.g. 204).
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Build a response from raw body text.
    ///
    /// Empty bodies become `Null`; non-JSON text is kept as a JSON string so
    /// it still shows up in error logs.
    #[must_use]
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        };
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Format a token as an `Authorization` header value.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Join an API base URL and a request path without doubling the slash.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Host-provided HTTP stack.
///
/// Futures are not required to be `Send`: browser fetch futures are not, and
/// the clients drive one operation at a time.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Send a request and return whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;

    /// Resolve after `duration`; the adapter races this against `send`.
    async fn sleep(&self, duration: Duration);
}
