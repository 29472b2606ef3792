//! Registry transport
//!
//! One outbound HTTP call per [`RegistryTransport::send`], no retries. The
//! trait is the seam between the registry clients and the network:
//!
//! - [`HttpTransport`] - reqwest, Basic auth, fixed timeout
//! - [`InMemoryTransport`] - canned responses for tests and offline demos

mod http;
mod in_memory;

pub use http::HttpTransport;
pub use in_memory::InMemoryTransport;

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Method;

/// A request relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRequest {
    pub method: Method,
    /// Path beginning with `/`, already percent-encoded where needed
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RegistryRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus form-encoded query string, e.g. `/def/ppi?postcode=SW1A1AA&limit=100`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// A successful (2xx) response, body not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Perform exactly one call. Non-2xx statuses are errors.
    async fn send(&self, request: RegistryRequest) -> Result<RawResponse, TransportError>;
}

/// Path segment escaping for identifiers placed into URL paths.
pub(crate) fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// First `max` characters of a response body, for diagnostics.
pub(crate) fn truncate_body(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}
