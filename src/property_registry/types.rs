//! Raw land registry response shapes

use std::num::NonZeroU64;

use serde::Deserialize;

/// One price-paid row. `price` is the only required field and must be
/// positive.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPricePaid {
    pub price: NonZeroU64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub new_build: Option<bool>,
    #[serde(default)]
    pub tenure: Option<String>,
    #[serde(default)]
    pub paon: Option<String>,
    #[serde(default)]
    pub saon: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTitle {
    pub title_number: Option<String>,
    pub property_address: Option<String>,
    pub tenure: Option<String>,
    pub proprietors: Option<Vec<RawProprietor>>,
    pub charges: Option<Vec<RawCharge>>,
    pub restrictions: Option<Vec<RawRestriction>>,
    pub price_paid: Option<Vec<RawPricePaid>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProprietor {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCharge {
    pub charge_type: Option<String>,
    pub date: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRestriction {
    pub restriction_type: Option<String>,
    pub details: Option<String>,
}
