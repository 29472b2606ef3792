//! reqwest-backed transport

use super::{truncate_body, RawResponse, RegistryRequest, RegistryTransport};
use crate::config::RegistryConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const ERROR_BODY_CHARS: usize = 200;

/// HTTP transport for one registry.
///
/// Authenticates with HTTP Basic, using the API key as the username and an
/// empty password.
pub struct HttpTransport {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Client {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    fn url_for(&self, request: &RegistryRequest) -> Result<Url, TransportError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path)).map_err(|e| {
            TransportError::Client {
                message: format!("invalid request URL {}{}: {e}", self.base_url, request.path),
            }
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            TransportError::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn send(&self, request: RegistryRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, url = %url, "registry request");

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(&url, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(&url, e))?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "registry returned error status");
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body, ERROR_BODY_CHARS),
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
