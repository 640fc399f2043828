//! The fetch capability the binding is built on.
//!
//! A [`Fetcher`] performs exactly one request/response exchange. It knows
//! nothing about operations or envelopes; the client layer builds requests
//! and interprets responses.

use async_trait::async_trait;

use crate::error::TransportError;

/// A single outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FetchRequest {
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path component of the url, e.g. `/status`
    pub fn path(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        match without_scheme.find('/') {
            Some(idx) => &without_scheme[idx..],
            None => "/",
        }
    }
}

/// The response to a [`FetchRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to perform one request/response exchange
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path() {
        let req = FetchRequest::post("http://workflow-binding.local/status", vec![]);
        assert_eq!(req.path(), "/status");
        assert_eq!(FetchRequest::post("http://host", vec![]).path(), "/");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = FetchRequest::post("http://h/get", vec![]).header("X-Version", "1");
        assert_eq!(req.header_value("x-version"), Some("1"));
        assert_eq!(req.header_value("content-type"), None);
    }

    #[test]
    fn test_success_range() {
        assert!(FetchResponse::new(200, "").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(199, "").is_success());
        assert!(!FetchResponse::new(409, "").is_success());
    }
}
