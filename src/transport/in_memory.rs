use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{RawResponse, RegistryRequest, RegistryTransport};
use crate::error::TransportError;

/// In-memory transport with canned responses, for tests and offline demos.
///
/// Responses are keyed by [`RegistryRequest::path_and_query`]. Unknown keys
/// answer HTTP 404. Every request is recorded.
#[derive(Default)]
pub struct InMemoryTransport {
    responses: HashMap<String, Result<RawResponse, TransportError>>,
    requests: Mutex<Vec<RegistryRequest>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path_and_query` with a 200 and the given JSON body.
    pub fn with_json(self, path_and_query: &str, body: serde_json::Value) -> Self {
        self.with_body(path_and_query, body.to_string())
    }

    /// Answer `path_and_query` with a 200 and a raw body.
    pub fn with_body(mut self, path_and_query: &str, body: impl Into<String>) -> Self {
        self.responses.insert(
            path_and_query.to_string(),
            Ok(RawResponse {
                status: 200,
                body: body.into(),
            }),
        );
        self
    }

    /// Fail `path_and_query` with the given transport error.
    pub fn with_error(mut self, path_and_query: &str, error: TransportError) -> Self {
        self.responses
            .insert(path_and_query.to_string(), Err(error));
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RegistryRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(RegistryRequest::path_and_query)
            .collect()
    }
}

#[async_trait]
impl RegistryTransport for InMemoryTransport {
    async fn send(&self, request: RegistryRequest) -> Result<RawResponse, TransportError> {
        let key = request.path_and_query();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        match self.responses.get(&key) {
            Some(canned) => canned.clone(),
            None => Err(TransportError::Status {
                url: key,
                status: 404,
                body: "no canned response".to_string(),
            }),
        }
    }
}
