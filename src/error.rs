//! Typed error model for registry access.
//!
//! Every failure surfaced to callers is a [`RegistryError`]: the registry and
//! operation that failed plus a [`RegistryFailure`] saying what kind of
//! failure it was. Callers branch on the kind, never on message text.
//!
//! ```text
//! transport layer   -> TransportError      (network | timeout | non-2xx)
//! normalizer        -> NormalizationError  (payload is not the expected shape)
//! client operation  -> RegistryError { registry, operation, cause }
//! ```

use serde::Serialize;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Attribution
// ---------------------------------------------------------------------------

/// Which external registry a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Registry {
    /// UK company registry
    Company,
    /// UK land / property registry
    Property,
}

impl std::fmt::Display for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Company => write!(f, "company"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// The client operation that was running when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Search,
    FetchCompany,
    FetchOfficers,
    FetchFilingHistory,
    FetchControllingPersons,
    FetchTitleRecord,
    FetchPricesByPostcode,
    FetchPricesByAddress,
    FetchOwnershipHistory,
    VerifyCompliance,
    AggregatePrices,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::FetchCompany => "fetch-company",
            Self::FetchOfficers => "fetch-officers",
            Self::FetchFilingHistory => "fetch-filing-history",
            Self::FetchControllingPersons => "fetch-controlling-persons",
            Self::FetchTitleRecord => "fetch-title-record",
            Self::FetchPricesByPostcode => "fetch-prices-by-postcode",
            Self::FetchPricesByAddress => "fetch-prices-by-address",
            Self::FetchOwnershipHistory => "fetch-ownership-history",
            Self::VerifyCompliance => "verify-compliance",
            Self::AggregatePrices => "aggregate-prices",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Layer errors
// ---------------------------------------------------------------------------

/// A single outbound HTTP call failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or body-read failure.
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// No response within the configured timeout or caller deadline.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The registry answered with a non-2xx status. `body` is truncated.
    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The HTTP client or request URL could not be built.
    #[error("HTTP client error: {message}")]
    Client { message: String },
}

impl TransportError {
    /// HTTP status, when the registry answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A response body did not have the raw shape the normalizer expects.
#[derive(Debug, thiserror::Error)]
#[error("malformed {shape} payload: {source}")]
pub struct NormalizationError {
    /// Name of the expected raw shape (e.g. `"company profile"`).
    pub shape: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl NormalizationError {
    pub fn new(shape: &'static str, source: serde_json::Error) -> Self {
        Self { shape, source }
    }
}

// ---------------------------------------------------------------------------
// RegistryError - the only error callers see
// ---------------------------------------------------------------------------

/// What went wrong, independent of which registry it went wrong in.
#[derive(Debug, thiserror::Error)]
pub enum RegistryFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// The caller's arguments were rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A transport, normalization or precondition failure attributed to a
/// registry and operation.
#[derive(Debug, thiserror::Error)]
#[error("{registry} registry {operation} failed: {cause}")]
pub struct RegistryError {
    pub registry: Registry,
    pub operation: Operation,
    #[source]
    pub cause: RegistryFailure,
}

impl RegistryError {
    pub fn new(registry: Registry, operation: Operation, cause: impl Into<RegistryFailure>) -> Self {
        Self {
            registry,
            operation,
            cause: cause.into(),
        }
    }

    /// The caller's overall deadline ran out before the operation finished.
    pub fn deadline_exceeded(
        registry: Registry,
        operation: Operation,
        target: impl Into<String>,
        deadline: Duration,
    ) -> Self {
        Self::new(
            registry,
            operation,
            TransportError::Timeout {
                url: target.into(),
                timeout: deadline,
            },
        )
    }

    pub fn invalid_input(
        registry: Registry,
        operation: Operation,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            registry,
            operation,
            RegistryFailure::InvalidInput(reason.into()),
        )
    }

    /// The registry answered 404. Not-found is not distinguished from other
    /// failures anywhere else.
    pub fn is_not_found(&self) -> bool {
        self.transport().and_then(TransportError::status) == Some(404)
    }

    /// Network failure, timeout, HTTP 429 or 5xx. All registry calls are
    /// read-only GETs, so a retry by the caller is always safe.
    pub fn is_retryable(&self) -> bool {
        match self.transport() {
            Some(TransportError::Network { .. }) | Some(TransportError::Timeout { .. }) => true,
            Some(TransportError::Status { status, .. }) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The external registry could not be used at all; callers should report
    /// "external data unavailable" rather than an internal fault.
    pub fn is_external_unavailable(&self) -> bool {
        self.transport().is_some()
    }

    fn transport(&self) -> Option<&TransportError> {
        match &self.cause {
            RegistryFailure::Transport(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> RegistryError {
        RegistryError::new(
            Registry::Company,
            Operation::FetchCompany,
            TransportError::Status {
                url: "https://example.test/company/00000000".into(),
                status,
                body: "{}".into(),
            },
        )
    }

    #[test]
    fn test_display_carries_registry_and_operation() {
        let err = status_error(404);
        let text = err.to_string();
        assert!(text.starts_with("company registry fetch-company failed"));
        assert!(text.contains("HTTP 404"));
    }

    #[test]
    fn test_not_found_is_only_404() {
        assert!(status_error(404).is_not_found());
        assert!(!status_error(401).is_not_found());
        assert!(!status_error(500).is_not_found());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(status_error(500).is_retryable());
        assert!(status_error(503).is_retryable());
        assert!(status_error(429).is_retryable());
        assert!(!status_error(404).is_retryable());

        let timeout = RegistryError::new(
            Registry::Property,
            Operation::FetchPricesByPostcode,
            TransportError::Timeout {
                url: "https://example.test/def/ppi".into(),
                timeout: Duration::from_secs(30),
            },
        );
        assert!(timeout.is_retryable());
        assert!(timeout.is_external_unavailable());
    }

    #[test]
    fn test_invalid_input_is_not_external() {
        let err =
            RegistryError::invalid_input(Registry::Company, Operation::Search, "empty query");
        assert!(!err.is_external_unavailable());
        assert!(!err.is_retryable());
        assert!(matches!(err.cause, RegistryFailure::InvalidInput(_)));
    }

    #[test]
    fn test_normalization_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = RegistryError::new(
            Registry::Property,
            Operation::FetchTitleRecord,
            NormalizationError::new("title record", source),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("malformed title record payload"));
    }
}
