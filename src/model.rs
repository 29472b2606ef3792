//! Internal value model
//!
//! Stable types both registries' raw responses are normalized into. Everything
//! here is an immutable value built fresh per call and returned by value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared
// =============================================================================

/// An associative record passed through without normalization.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Structured postal address. Missing required parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub locality: String,
    pub region: Option<String>,
    pub postal_code: String,
    pub country: String,
}

// =============================================================================
// Company registry
// =============================================================================

/// Company status. Unmapped values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyStatus {
    Active,
    Dissolved,
    Liquidation,
    Administration,
    Other(String),
}

impl CompanyStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "dissolved" => Self::Dissolved,
            "liquidation" => Self::Liquidation,
            "administration" => Self::Administration,
            other => Self::Other(other.to_string()),
        }
    }

    /// The status string exactly as the registry reported it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Dissolved => "dissolved",
            Self::Liquidation => "liquidation",
            Self::Administration => "administration",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<String> for CompanyStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<CompanyStatus> for String {
    fn from(status: CompanyStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SIC code with its resolved description (the raw code when unresolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCode {
    pub code: String,
    pub description: String,
}

/// A company profile as held by the company registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Registry-assigned company number
    pub company_number: String,
    pub legal_name: String,
    pub status: CompanyStatus,
    pub entity_type: String,
    pub incorporated_on: Option<NaiveDate>,
    pub registered_address: Address,
    pub classification_codes: Vec<ClassificationCode>,
    pub accounts_due: Option<NaiveDate>,
    pub last_accounts_made_up_to: Option<NaiveDate>,
    pub confirmation_statement_due: Option<NaiveDate>,
    pub confirmation_statement_last_made_up_to: Option<NaiveDate>,
}

/// One row of a company name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub company_number: String,
    pub title: String,
    pub status: CompanyStatus,
    pub company_type: String,
    pub address_snippet: String,
    pub incorporated_on: Option<NaiveDate>,
}

/// Birth year and month. The registry never exposes the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub name: String,
    pub role: String,
    pub date_of_birth: Option<PartialDate>,
    pub nationality: String,
    pub country_of_residence: String,
    pub occupation: String,
    pub appointed_on: Option<NaiveDate>,
    pub resigned_on: Option<NaiveDate>,
    pub address: Address,
}

impl Officer {
    pub fn is_active(&self) -> bool {
        self.resigned_on.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingEntry {
    pub transaction_id: String,
    pub filing_type: String,
    pub description: String,
    pub filed_on: Option<NaiveDate>,
    pub category: String,
    pub subcategory: Option<String>,
}

impl FilingEntry {
    /// Description mentions "strike" or "dissolution", ignoring case.
    pub fn mentions_strike_off(&self) -> bool {
        let description = self.description.to_lowercase();
        description.contains("strike") || description.contains("dissolution")
    }
}

/// Compliance verdict for one company.
///
/// `is_in_good_standing` is true iff `is_active` and `issues` is empty;
/// [`ComplianceVerdict::new`] is the only constructor that computes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub is_active: bool,
    pub is_in_good_standing: bool,
    pub status_label: String,
    /// Issue descriptions in rule order; empty when none were found
    pub issues: Vec<String>,
}

impl ComplianceVerdict {
    pub fn new(is_active: bool, status_label: impl Into<String>, issues: Vec<String>) -> Self {
        Self {
            is_active,
            is_in_good_standing: is_active && issues.is_empty(),
            status_label: status_label.into(),
            issues,
        }
    }
}

// =============================================================================
// Property registry
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tenure {
    Freehold,
    Leasehold,
    Other(String),
}

impl Tenure {
    /// Accepts the long form or the single-letter code, ignoring case.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("freehold") || trimmed.eq_ignore_ascii_case("f") {
            Self::Freehold
        } else if trimmed.eq_ignore_ascii_case("leasehold") || trimmed.eq_ignore_ascii_case("l") {
            Self::Leasehold
        } else {
            Self::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Freehold => "freehold",
            Self::Leasehold => "leasehold",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Tenure {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Tenure> for String {
    fn from(tenure: Tenure) -> Self {
        tenure.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proprietor {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub charge_type: String,
    pub charged_on: Option<NaiveDate>,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub restriction_type: String,
    pub detail: String,
}

/// One recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub postcode: String,
    pub address: String,
    pub sold_on: Option<NaiveDate>,
    /// Whole pounds
    pub price: u64,
    pub property_type: String,
    pub new_build: bool,
    pub tenure: Tenure,
    /// Primary addressable object name (house number or name)
    pub paon: String,
    /// Secondary addressable object name (flat, unit)
    pub saon: String,
    pub street: String,
    pub locality: String,
    pub town: String,
    pub district: String,
    pub county: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub title_number: String,
    pub address: String,
    pub tenure: Tenure,
    pub proprietors: Vec<Proprietor>,
    pub charges: Vec<Charge>,
    pub restrictions: Vec<Restriction>,
    pub price_history: Vec<PriceObservation>,
}

/// Descriptive statistics over a set of sale prices.
///
/// An empty sample is not an error: every figure is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub average: u64,
    /// Lower median: `sorted[len / 2]`, never the mean of the two middle
    /// values.
    pub median: u64,
    pub min: u64,
    pub max: u64,
    pub sample_size: usize,
    pub computed_at: DateTime<Utc>,
}

impl PriceStatistics {
    pub fn empty(computed_at: DateTime<Utc>) -> Self {
        Self {
            average: 0,
            median: 0,
            min: 0,
            max: 0,
            sample_size: 0,
            computed_at,
        }
    }

    pub fn from_prices(prices: &[u64], computed_at: DateTime<Utc>) -> Self {
        if prices.is_empty() {
            return Self::empty(computed_at);
        }

        let mut sorted = prices.to_vec();
        sorted.sort_unstable();

        let count = sorted.len() as u128;
        let sum: u128 = sorted.iter().map(|&p| p as u128).sum();
        // round half up
        let average = ((sum + count / 2) / count) as u64;

        Self {
            average,
            median: sorted[sorted.len() / 2],
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            sample_size: sorted.len(),
            computed_at,
        }
    }
}
