//! Registry verification and aggregation
//!
//! Clients for the UK company registry and the land/property registry, plus
//! the two places where registry data turns into derived facts:
//!
//! - [`ComplianceVerifier`] - good-standing verdict for a company
//! - [`PriceAggregator`] - price distribution for a postcode
//!
//! ## Call chain
//!
//! ```text
//! caller -> ComplianceVerifier | PriceAggregator
//!        -> CompanyRegistryClient | PropertyRegistryClient
//!        -> RegistryTransport (HttpTransport / InMemoryTransport)
//!        -> normalize_* -> internal model
//! ```
//!
//! Nothing here holds state between calls. Every operation is a plain future;
//! dropping it cancels every in-flight registry request it started.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use registry_verification::{CompanyRegistryClient, ComplianceVerifier, RegistryConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::companies_house("my-api-key");
//! let client = CompanyRegistryClient::new(&config)?;
//! let verdict = ComplianceVerifier::new(client).verify("01234567").await?;
//! println!("{} in good standing: {}", verdict.status_label, verdict.is_in_good_standing);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Per-registry connection settings
pub mod config;

// Internal value model shared by both registries
pub mod model;

// HTTP plumbing and raw payload handling
pub mod normalize;
pub mod transport;

// Registry clients
pub mod company_registry;
pub mod property_registry;

// Derived facts
pub mod aggregation;
pub mod compliance;

pub use aggregation::PriceAggregator;
pub use company_registry::{
    CompanyRegistryClient, NoSicLookup, SicCodeLookup, StaticSicLookup,
};
pub use compliance::ComplianceVerifier;
pub use config::{RegistryConfig, RegistrySettings};
pub use error::{
    NormalizationError, Operation, Registry, RegistryError, RegistryFailure, TransportError,
};
pub use model::*;
pub use property_registry::{
    format_postcode, is_valid_postcode, normalize_postcode, PropertyRegistryClient,
};
pub use transport::{HttpTransport, InMemoryTransport, RawResponse, RegistryRequest, RegistryTransport};
