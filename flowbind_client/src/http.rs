//! HTTP fetcher for engines reachable over the network.
//!
//! The binding addresses every request to a virtual origin. This fetcher
//! keeps the request path, method, headers and body, and sends them to the
//! configured endpoint instead.

use std::time::Duration;

use async_trait::async_trait;
use flowbind_core::{FetchRequest, FetchResponse, Fetcher, TransportError};
use tracing::{debug, warn};

/// HTTP fetcher configuration
#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// Base URL of the engine, e.g. `http://127.0.0.1:8787`
    pub endpoint: String,
    /// Per-request timeout. Unset by default.
    pub timeout: Option<Duration>,
}

impl FetcherOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }
}

/// [`Fetcher`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_options(FetcherOptions::new(endpoint))
    }

    pub fn with_options(options: FetcherOptions) -> Result<Self, TransportError> {
        let endpoint = options.endpoint.trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "{endpoint}: unsupported scheme `{}`",
                url.scheme()
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::request(&endpoint, e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout: options.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn target_url(&self, request: &FetchRequest) -> String {
        format!("{}{}", self.endpoint, request.path())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let url = self.target_url(&request);
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::request(&url, format!("invalid method: {e}")))?;

        debug!(method = %method, url = %url, "sending binding request");

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await.map_err(|e| {
            warn!(error = %e, url = %url, "HTTP request failed");
            if e.is_timeout() {
                TransportError::Timeout(self.timeout.unwrap_or_default())
            } else {
                TransportError::request(&url, e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status, url = %url, "binding response received");
        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(matches!(
            HttpFetcher::new("not a url"),
            Err(TransportError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpFetcher::new("ftp://engine.local"),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_rewrites_origin_keeps_path() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:8787/").unwrap();
        let request = FetchRequest::post("http://workflow-binding.local/status", Vec::new());
        assert_eq!(fetcher.endpoint(), "http://127.0.0.1:8787");
        assert_eq!(fetcher.target_url(&request), "http://127.0.0.1:8787/status");
    }
}
