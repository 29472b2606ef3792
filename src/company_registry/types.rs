//! Raw company registry response shapes
//!
//! Mirrors the registry's JSON. Every field the registry may omit is
//! `#[serde(default)]`, so only a payload of the wrong overall shape fails to
//! deserialize.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub premises: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCompanyProfile {
    pub company_number: Option<String>,
    pub company_name: Option<String>,
    pub company_status: Option<String>,
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub date_of_creation: Option<String>,
    pub registered_office_address: Option<RawAddress>,
    pub sic_codes: Option<Vec<String>>,
    pub accounts: Option<RawAccounts>,
    pub confirmation_statement: Option<RawConfirmationStatement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAccounts {
    pub next_due: Option<String>,
    pub next_accounts: Option<RawNextAccounts>,
    pub last_accounts: Option<RawLastAccounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNextAccounts {
    pub due_on: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLastAccounts {
    pub made_up_to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfirmationStatement {
    pub next_due: Option<String>,
    pub last_made_up_to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchItem {
    pub company_number: Option<String>,
    pub title: Option<String>,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub address_snippet: Option<String>,
    pub date_of_creation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOfficer {
    pub name: Option<String>,
    pub officer_role: Option<String>,
    pub date_of_birth: Option<RawPartialDate>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
    pub occupation: Option<String>,
    pub appointed_on: Option<String>,
    pub resigned_on: Option<String>,
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFiling {
    pub transaction_id: Option<String>,
    #[serde(rename = "type")]
    pub filing_type: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    /// A string on most filings, an array of strings on some.
    pub subcategory: Option<serde_json::Value>,
}
