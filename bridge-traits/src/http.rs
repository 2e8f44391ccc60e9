//! Outbound HTTP seam
//!
//! Library crates never depend on an HTTP stack; they are handed an
//! `Arc<dyn HttpClient>` and speak in [`HttpRequest`]/[`HttpResponse`].

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{BridgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An outbound request
///
/// `timeout`, when set, bounds the whole exchange and overrides the
/// client's default.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A response of any status
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| BridgeError::OperationFailed(format!("undecodable JSON body: {}", e)))
    }
}

/// Sends requests on behalf of library code
///
/// One call is one attempt. A non-2xx status is a successful exchange and
/// comes back as `Ok`; only transport failures are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_get_request_builder() {
        let request = HttpRequest::get("http://api.test/info?group=Muse")
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(3));

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.headers["Accept"], "application/json");
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_success_range() {
        assert!(response(200, "").is_success());
        assert!(response(204, "").is_success());
        assert!(!response(302, "").is_success());
        assert!(!response(404, "").is_success());
    }

    #[test]
    fn test_json_body() {
        #[derive(Debug, serde::Deserialize)]
        struct Detail {
            link: String,
        }

        let detail: Detail = response(200, r#"{"link":"https://example.com"}"#)
            .json()
            .unwrap();
        assert_eq!(detail.link, "https://example.com");

        let err = response(200, "<html>").json::<Detail>().unwrap_err();
        assert!(matches!(err, BridgeError::OperationFailed(_)));
    }
}
