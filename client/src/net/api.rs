//! Browser transport for the shared HTTP adapter.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, timeouts via
//! `gloo-timers`.
//! Native builds (tests, tooling): a stub that reports the transport as
//! unavailable, since the API is only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response at all" is a transport error. Any HTTP status, including
//! 4xx/5xx, is handed back to the adapter, which owns interpreting it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use session::{ApiClient, ApiRequest, ApiResponse, DEFAULT_TIMEOUT, SessionStore, Transport, TransportError};

use crate::util::storage::LocalStorageTokens;

/// API base URL used when none was set at build time.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// The session store type every page works with.
pub type MuralSession = SessionStore<BrowserTransport, LocalStorageTokens>;

/// Base URL baked in at compile time via `MURAL_API_URL`.
pub fn api_base_url() -> &'static str {
    option_env!("MURAL_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Build the single session store for this page load.
pub fn new_session() -> MuralSession {
    let api = ApiClient::new(BrowserTransport::new(api_base_url()), LocalStorageTokens).with_timeout(DEFAULT_TIMEOUT);
    SessionStore::new(api)
}

#[derive(Clone, Debug)]
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as HttpMethod, RequestBuilder};
            use session::Method;

            let url = session::transport::join_url(&self.base_url, &request.path);
            let method = match request.method {
                Method::Get => HttpMethod::GET,
                Method::Post => HttpMethod::POST,
                Method::Put => HttpMethod::PUT,
                Method::Delete => HttpMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&url).method(method);
            if let Some(authorization) = request.authorization() {
                builder = builder.header("Authorization", &authorization);
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let response = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Ok(ApiResponse::from_text(status, &text))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError(format!("no browser transport for {}", self.base_url)))
        }
    }

    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "csr")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = duration;
            std::future::pending::<()>().await;
        }
    }
}
