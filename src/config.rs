//! Registry connection settings.
//!
//! Each client takes its [`RegistryConfig`] as an explicit constructor input.
//! [`RegistrySettings::from_env`] exists for binaries; the library never reads
//! the environment on its own.
//!
//! ## Environment
//!
//! ```bash
//! export COMPANIES_HOUSE_API_KEY="..."            # required
//! export LAND_REGISTRY_API_KEY="..."              # required
//! export COMPANIES_HOUSE_BASE_URL="https://..."   # optional
//! export LAND_REGISTRY_BASE_URL="https://..."     # optional
//! export REGISTRY_TIMEOUT_SECS="30"               # optional
//! ```

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const COMPANIES_HOUSE_BASE_URL: &str = "https://api.company-information.service.gov.uk";
pub const LAND_REGISTRY_BASE_URL: &str = "https://landregistry.data.gov.uk";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL, credential and request timeout for one registry.
///
/// The credential is sent as the Basic auth username with an empty password.
/// Neither the URL nor the key is validated here.
#[derive(Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RegistryConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Config pointing at the public company registry API.
    pub fn companies_house(api_key: impl Into<String>) -> Self {
        Self::new(COMPANIES_HOUSE_BASE_URL, api_key)
    }

    /// Config pointing at the public land registry API.
    pub fn land_registry(api_key: impl Into<String>) -> Self {
        Self::new(LAND_REGISTRY_BASE_URL, api_key)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Both registries' settings, as loaded by a binary.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub company: RegistryConfig,
    pub property: RegistryConfig,
}

impl RegistrySettings {
    /// Loads settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if either API key is missing or the timeout is not a
    /// whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let timeout = match env::var("REGISTRY_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .with_context(|| format!("REGISTRY_TIMEOUT_SECS is not a number: {v}"))?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let company_key = env::var("COMPANIES_HOUSE_API_KEY")
            .context("COMPANIES_HOUSE_API_KEY environment variable not set")?;
        let property_key = env::var("LAND_REGISTRY_API_KEY")
            .context("LAND_REGISTRY_API_KEY environment variable not set")?;

        let company_url = env::var("COMPANIES_HOUSE_BASE_URL")
            .unwrap_or_else(|_| COMPANIES_HOUSE_BASE_URL.to_string());
        let property_url = env::var("LAND_REGISTRY_BASE_URL")
            .unwrap_or_else(|_| LAND_REGISTRY_BASE_URL.to_string());

        Ok(Self {
            company: RegistryConfig::new(company_url, company_key).with_timeout(timeout),
            property: RegistryConfig::new(property_url, property_key).with_timeout(timeout),
        })
    }
}
