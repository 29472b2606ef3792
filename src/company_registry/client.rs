//! Company registry client
//!
//! Typed operations over the UK company registry API. Every call is a single
//! GET through the injected [`RegistryTransport`]; responses are normalized
//! before they leave this module.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::normalize::{normalize_company, normalize_filing, normalize_officer, normalize_search_item};
use super::sic::{SicCodeLookup, StaticSicLookup};
use super::types::{RawCompanyProfile, RawFiling, RawOfficer, RawSearchItem};
use crate::config::RegistryConfig;
use crate::error::{Operation, Registry, RegistryError, TransportError};
use crate::model::{CompanyRecord, CompanySummary, FilingEntry, Officer, RawRecord};
use crate::normalize::{parse_payload, ItemList};
use crate::transport::{encode_path_segment, HttpTransport, RegistryRequest, RegistryTransport};

pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 20;
pub const DEFAULT_FILING_PAGE_SIZE: usize = 35;

/// Two-letter prefixes for companies not registered in England and Wales
/// (Scottish, Northern Irish, LLPs, overseas, ...).
const COMPANY_NUMBER_PREFIXES: &[&str] = &[
    "SC", "NI", "NC", "NF", "OC", "SO", "LP", "SL", "FC", "SF", "NL", "GE", "IP", "SP", "IC", "SI",
    "NP", "NO", "RC", "SR", "AC", "SA", "NA", "NZ", "CE", "CS", "PC", "RS",
];

/// Company registry client
pub struct CompanyRegistryClient {
    transport: Arc<dyn RegistryTransport>,
    sic_lookup: Arc<dyn SicCodeLookup>,
}

impl CompanyRegistryClient {
    /// Create a client talking HTTP to the configured registry.
    pub fn new(config: &RegistryConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over an existing transport.
    pub fn with_transport(transport: Arc<dyn RegistryTransport>) -> Self {
        Self {
            transport,
            sic_lookup: Arc::new(StaticSicLookup),
        }
    }

    /// Replace the SIC description table.
    pub fn with_sic_lookup(mut self, lookup: Arc<dyn SicCodeLookup>) -> Self {
        self.sic_lookup = lookup;
        self
    }

    /// Send one request and deserialize the body into its raw shape.
    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        shape: &'static str,
        request: RegistryRequest,
    ) -> Result<T, RegistryError> {
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(registry = %Registry::Company, operation = %operation, error = %e, "registry call failed");
            RegistryError::new(Registry::Company, operation, e)
        })?;

        parse_payload(shape, &response.body)
            .map_err(|e| RegistryError::new(Registry::Company, operation, e))
    }

    /// Search companies by name.
    pub async fn search_companies(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<CompanySummary>, RegistryError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RegistryError::invalid_input(
                Registry::Company,
                Operation::Search,
                "search query must not be empty",
            ));
        }
        if page_size == 0 {
            return Err(RegistryError::invalid_input(
                Registry::Company,
                Operation::Search,
                "page size must be at least 1",
            ));
        }

        let request = RegistryRequest::get("/search/companies")
            .with_query("q", query)
            .with_query("items_per_page", page_size);
        let results: ItemList<RawSearchItem> =
            self.get(Operation::Search, "search result", request).await?;

        Ok(results
            .into_items()
            .iter()
            .map(normalize_search_item)
            .collect())
    }

    /// Get a company profile by company number.
    ///
    /// A 404 surfaces like any other transport failure; use
    /// [`RegistryError::is_not_found`] to tell them apart.
    pub async fn fetch_company(&self, company_number: &str) -> Result<CompanyRecord, RegistryError> {
        let path = company_path(company_number, "", Operation::FetchCompany)?;
        let raw: RawCompanyProfile = self
            .get(Operation::FetchCompany, "company profile", RegistryRequest::get(path))
            .await?;
        Ok(normalize_company(&raw, self.sic_lookup.as_ref()))
    }

    /// Get officers for a company
    pub async fn fetch_officers(&self, company_number: &str) -> Result<Vec<Officer>, RegistryError> {
        let path = company_path(company_number, "/officers", Operation::FetchOfficers)?;
        let officers: ItemList<RawOfficer> = self
            .get(Operation::FetchOfficers, "officer list", RegistryRequest::get(path))
            .await?;
        Ok(officers.into_items().iter().map(normalize_officer).collect())
    }

    /// Most recent filings first, at most `page_size` of them.
    pub async fn fetch_filing_history(
        &self,
        company_number: &str,
        page_size: usize,
    ) -> Result<Vec<FilingEntry>, RegistryError> {
        if page_size == 0 {
            return Err(RegistryError::invalid_input(
                Registry::Company,
                Operation::FetchFilingHistory,
                "page size must be at least 1",
            ));
        }
        let path = company_path(company_number, "/filing-history", Operation::FetchFilingHistory)?;
        let request = RegistryRequest::get(path).with_query("items_per_page", page_size);
        let filings: ItemList<RawFiling> = self
            .get(Operation::FetchFilingHistory, "filing history", request)
            .await?;
        Ok(filings.into_items().iter().map(normalize_filing).collect())
    }

    /// Persons with significant control, as the registry returned them.
    ///
    /// Left unnormalized: the shape differs per kind of controlling person
    /// (individual, corporate entity, legal person, statements).
    pub async fn fetch_controlling_persons(
        &self,
        company_number: &str,
    ) -> Result<Vec<RawRecord>, RegistryError> {
        let path = company_path(
            company_number,
            "/persons-with-significant-control",
            Operation::FetchControllingPersons,
        )?;
        let persons: ItemList<RawRecord> = self
            .get(
                Operation::FetchControllingPersons,
                "controlling persons",
                RegistryRequest::get(path),
            )
            .await?;
        Ok(persons.into_items())
    }
}

fn company_path(
    company_number: &str,
    suffix: &str,
    operation: Operation,
) -> Result<String, RegistryError> {
    let number = normalize_company_number(company_number);
    if number.is_empty() {
        return Err(RegistryError::invalid_input(
            Registry::Company,
            operation,
            "company number must not be empty",
        ));
    }
    Ok(format!("/company/{}{}", encode_path_segment(&number), suffix))
}

/// Normalize company number to 8 characters with leading zeros.
///
/// Pure numbers are padded to 8 digits, prefixed numbers to prefix + 6
/// digits. Anything else is returned trimmed and upper-cased.
pub fn normalize_company_number(number: &str) -> String {
    let number = number.trim().to_uppercase();

    if let Some(prefix) = company_number_prefix(&number) {
        let digits = &number[prefix.len()..];
        if number.len() < 8 && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}{:0>6}", prefix, digits);
        }
        return number;
    }

    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        return format!("{:0>8}", number);
    }

    number
}

/// Whether `number` looks like a registry company number (before padding).
pub fn is_valid_company_number(number: &str) -> bool {
    let number = number.trim().to_uppercase();
    if number.is_empty() || number.len() > 8 {
        return false;
    }

    let digits = match company_number_prefix(&number) {
        Some(prefix) => &number[prefix.len()..],
        None => number.as_str(),
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn company_number_prefix(number: &str) -> Option<&'static str> {
    COMPANY_NUMBER_PREFIXES
        .iter()
        .copied()
        .find(|prefix| number.starts_with(prefix))
}
