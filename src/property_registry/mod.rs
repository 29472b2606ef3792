//! UK land / property registry
//!
//! - **Key types:** title number, postcode
//! - **Provides:** title register entries, price-paid observations,
//!   ownership history (raw)

mod client;
mod normalize;
mod postcode;
pub mod types;

pub use client::{PropertyRegistryClient, DEFAULT_ADDRESS_LIMIT, DEFAULT_POSTCODE_LIMIT};
pub use normalize::{normalize_price_paid, normalize_title};
pub use postcode::{format_postcode, is_valid_postcode, normalize_postcode};
