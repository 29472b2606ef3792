//! UK company registry
//!
//! - **Key type:** company number (8 characters once padded)
//! - **Provides:** search, company profile, officers, filing history,
//!   persons with significant control (raw)

mod client;
mod normalize;
mod sic;
pub mod types;

pub use client::{
    is_valid_company_number, normalize_company_number, CompanyRegistryClient,
    DEFAULT_FILING_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE,
};
pub use normalize::{
    normalize_address, normalize_company, normalize_filing, normalize_officer,
    normalize_search_item,
};
pub use sic::{NoSicLookup, SicCodeLookup, StaticSicLookup};
