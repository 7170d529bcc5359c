//! `reqwest` transport for the terminal client.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use session::transport::join_url;
use session::{ApiRequest, ApiResponse, Method, Transport, TransportError};

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path);
        let mut builder = self.client.request(Self::method(request.method), &url);
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| TransportError(error.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|error| TransportError(error.to_string()))?;
        Ok(ApiResponse::from_text(status, &text))
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
