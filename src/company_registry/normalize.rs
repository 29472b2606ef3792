//! Normalization functions for company registry data
//!
//! Converts raw registry types to the internal model. Infallible: absent
//! strings become `""`, absent lists `[]`, absent dates `None`.

use super::sic::SicCodeLookup;
use super::types::{RawAddress, RawCompanyProfile, RawFiling, RawOfficer, RawSearchItem};
use crate::model::{
    Address, ClassificationCode, CompanyRecord, CompanyStatus, CompanySummary, FilingEntry,
    Officer, PartialDate,
};
use crate::normalize::{optional_text, parse_date, text};

/// Normalize a company profile.
pub fn normalize_company(raw: &RawCompanyProfile, sic: &dyn SicCodeLookup) -> CompanyRecord {
    let accounts = raw.accounts.clone().unwrap_or_default();
    let confirmation = raw.confirmation_statement.clone().unwrap_or_default();

    // `next_due` is the canonical field; older profiles only carry next_accounts
    let accounts_due = parse_date(accounts.next_due.as_deref()).or_else(|| {
        accounts
            .next_accounts
            .as_ref()
            .and_then(|n| parse_date(n.due_on.as_deref()))
    });

    CompanyRecord {
        company_number: text(&raw.company_number),
        legal_name: text(&raw.company_name),
        status: CompanyStatus::parse(&text(&raw.company_status)),
        entity_type: text(&raw.company_type),
        incorporated_on: parse_date(raw.date_of_creation.as_deref()),
        registered_address: raw
            .registered_office_address
            .as_ref()
            .map(normalize_address)
            .unwrap_or_default(),
        classification_codes: raw
            .sic_codes
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|code| classify(code, sic))
            .collect(),
        accounts_due,
        last_accounts_made_up_to: accounts
            .last_accounts
            .as_ref()
            .and_then(|l| parse_date(l.made_up_to.as_deref())),
        confirmation_statement_due: parse_date(confirmation.next_due.as_deref()),
        confirmation_statement_last_made_up_to: parse_date(
            confirmation.last_made_up_to.as_deref(),
        ),
    }
}

fn classify(code: &str, sic: &dyn SicCodeLookup) -> ClassificationCode {
    let code = code.trim().to_string();
    let description = sic.describe(&code).unwrap_or_else(|| code.clone());
    ClassificationCode { code, description }
}

/// Normalize a registry address
pub fn normalize_address(raw: &RawAddress) -> Address {
    let mut line1 = text(&raw.address_line_1);

    // Fold the premises (house number/name) into the first line
    if let Some(premises) = optional_text(&raw.premises) {
        if line1.is_empty() {
            line1 = premises;
        } else if !line1.starts_with(&premises) {
            line1 = format!("{} {}", premises, line1);
        }
    }

    Address {
        line1,
        line2: optional_text(&raw.address_line_2),
        locality: text(&raw.locality),
        region: optional_text(&raw.region),
        postal_code: text(&raw.postal_code),
        country: text(&raw.country),
    }
}

pub fn normalize_search_item(raw: &RawSearchItem) -> CompanySummary {
    CompanySummary {
        company_number: text(&raw.company_number),
        title: text(&raw.title),
        status: CompanyStatus::parse(&text(&raw.company_status)),
        company_type: text(&raw.company_type),
        address_snippet: text(&raw.address_snippet),
        incorporated_on: parse_date(raw.date_of_creation.as_deref()),
    }
}

pub fn normalize_officer(raw: &RawOfficer) -> Officer {
    Officer {
        name: text(&raw.name),
        role: text(&raw.officer_role),
        date_of_birth: raw.date_of_birth.as_ref().and_then(|dob| {
            match (dob.year, dob.month) {
                (Some(year), Some(month)) if (1..=12).contains(&month) => {
                    Some(PartialDate { year, month })
                }
                _ => None,
            }
        }),
        nationality: text(&raw.nationality),
        country_of_residence: text(&raw.country_of_residence),
        occupation: text(&raw.occupation),
        appointed_on: parse_date(raw.appointed_on.as_deref()),
        resigned_on: parse_date(raw.resigned_on.as_deref()),
        address: raw
            .address
            .as_ref()
            .map(normalize_address)
            .unwrap_or_default(),
    }
}

pub fn normalize_filing(raw: &RawFiling) -> FilingEntry {
    FilingEntry {
        transaction_id: text(&raw.transaction_id),
        filing_type: text(&raw.filing_type),
        description: text(&raw.description),
        filed_on: parse_date(raw.date.as_deref()),
        category: text(&raw.category),
        subcategory: raw.subcategory.as_ref().and_then(subcategory_text),
    }
}

fn subcategory_text(value: &serde_json::Value) -> Option<String> {
    let joined = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.as_str())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company_registry::sic::{NoSicLookup, StaticSicLookup};
    use crate::normalize::parse_payload;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_normalize_full_company_profile() {
        let raw: RawCompanyProfile = serde_json::from_value(json!({
            "company_number": "01234567",
            "company_name": "ACME LETTINGS LIMITED",
            "company_status": "active",
            "type": "ltd",
            "date_of_creation": "2012-05-14",
            "registered_office_address": {
                "premises": "10",
                "address_line_1": "Downing Street",
                "locality": "London",
                "postal_code": "SW1A 2AA",
                "country": "England"
            },
            "sic_codes": ["68209", "12345"],
            "accounts": {
                "next_due": "2025-09-30",
                "last_accounts": { "made_up_to": "2023-12-31" }
            },
            "confirmation_statement": {
                "next_due": "2025-06-01",
                "last_made_up_to": "2024-05-18"
            }
        }))
        .unwrap();

        let company = normalize_company(&raw, &StaticSicLookup);
        assert_eq!(company.company_number, "01234567");
        assert_eq!(company.legal_name, "ACME LETTINGS LIMITED");
        assert_eq!(company.status, CompanyStatus::Active);
        assert_eq!(company.entity_type, "ltd");
        assert_eq!(company.incorporated_on, date(2012, 5, 14));
        assert_eq!(company.registered_address.line1, "10 Downing Street");
        assert_eq!(company.registered_address.line2, None);
        assert_eq!(company.registered_address.postal_code, "SW1A 2AA");
        assert_eq!(company.accounts_due, date(2025, 9, 30));
        assert_eq!(company.last_accounts_made_up_to, date(2023, 12, 31));
        assert_eq!(company.confirmation_statement_due, date(2025, 6, 1));
        assert_eq!(company.confirmation_statement_last_made_up_to, date(2024, 5, 18));

        assert_eq!(company.classification_codes.len(), 2);
        assert_eq!(
            company.classification_codes[0].description,
            "Other letting and operating of own or leased real estate"
        );
        // unresolved code keeps the raw code as its description
        assert_eq!(company.classification_codes[1].description, "12345");
    }

    #[test]
    fn test_overdue_flags_do_not_drive_due_dates() {
        // the registry's own overdue flags are ignored; only due dates count
        let raw: RawCompanyProfile = serde_json::from_value(json!({
            "accounts": { "next_due": "2025-09-30", "overdue": true },
            "confirmation_statement": { "next_due": "2025-06-01", "overdue": true }
        }))
        .unwrap();

        let company = normalize_company(&raw, &NoSicLookup);
        assert_eq!(company.accounts_due, date(2025, 9, 30));
        assert_eq!(company.confirmation_statement_due, date(2025, 6, 1));
    }

    #[test]
    fn test_normalize_empty_company_profile_uses_defaults() {
        let raw: RawCompanyProfile = parse_payload("company profile", "{}").unwrap();
        let company = normalize_company(&raw, &NoSicLookup);

        assert_eq!(company.company_number, "");
        assert_eq!(company.legal_name, "");
        assert_eq!(company.status, CompanyStatus::Other(String::new()));
        assert_eq!(company.entity_type, "");
        assert_eq!(company.incorporated_on, None);
        assert_eq!(company.registered_address, Address::default());
        assert!(company.classification_codes.is_empty());
        assert_eq!(company.accounts_due, None);
        assert_eq!(company.last_accounts_made_up_to, None);
        assert_eq!(company.confirmation_statement_due, None);
        assert_eq!(company.confirmation_statement_last_made_up_to, None);
    }

    #[test]
    fn test_nulls_are_treated_as_absent() {
        let raw: RawCompanyProfile = serde_json::from_value(json!({
            "company_name": null,
            "sic_codes": null,
            "accounts": null
        }))
        .unwrap();
        let company = normalize_company(&raw, &NoSicLookup);
        assert_eq!(company.legal_name, "");
        assert!(company.classification_codes.is_empty());
    }

    #[test]
    fn test_accounts_due_falls_back_to_next_accounts() {
        let raw: RawCompanyProfile = serde_json::from_value(json!({
            "accounts": { "next_accounts": { "due_on": "2024-01-31" } }
        }))
        .unwrap();
        let company = normalize_company(&raw, &NoSicLookup);
        assert_eq!(company.accounts_due, date(2024, 1, 31));
    }

    #[test]
    fn test_malformed_profile_is_rejected() {
        let err = parse_payload::<RawCompanyProfile>("company profile", r#"{"sic_codes": 5}"#)
            .unwrap_err();
        assert_eq!(err.shape, "company profile");
        assert!(parse_payload::<RawCompanyProfile>("company profile", "not json").is_err());
    }

    #[test]
    fn test_normalize_officer() {
        let raw: RawOfficer = serde_json::from_value(json!({
            "name": "SMITH, Jane",
            "officer_role": "director",
            "date_of_birth": { "year": 1980, "month": 7 },
            "nationality": "British",
            "country_of_residence": "England",
            "occupation": "Landlord",
            "appointed_on": "2015-02-01",
            "address": { "address_line_1": "1 High Street", "locality": "Leeds" }
        }))
        .unwrap();

        let officer = normalize_officer(&raw);
        assert_eq!(officer.name, "SMITH, Jane");
        assert_eq!(officer.role, "director");
        assert_eq!(
            officer.date_of_birth,
            Some(PartialDate {
                year: 1980,
                month: 7
            })
        );
        assert_eq!(officer.appointed_on, date(2015, 2, 1));
        assert!(officer.is_active());
        assert_eq!(officer.address.locality, "Leeds");
    }

    #[test]
    fn test_officer_defaults() {
        let officer = normalize_officer(&RawOfficer::default());
        assert_eq!(officer.name, "");
        assert_eq!(officer.nationality, "");
        assert_eq!(officer.country_of_residence, "");
        assert_eq!(officer.occupation, "");
        assert_eq!(officer.date_of_birth, None);
        assert_eq!(officer.appointed_on, None);
        assert_eq!(officer.resigned_on, None);
        assert_eq!(officer.address, Address::default());
    }

    #[test]
    fn test_partial_birth_date_needs_year_and_month() {
        let raw: RawOfficer =
            serde_json::from_value(json!({ "date_of_birth": { "year": 1980 } })).unwrap();
        assert_eq!(normalize_officer(&raw).date_of_birth, None);
    }

    #[test]
    fn test_normalize_filing_subcategory_shapes() {
        let raw: RawFiling = serde_json::from_value(json!({
            "transaction_id": "MzAwMDAwMDAwMQ",
            "type": "GAZ1",
            "description": "Gazette notice for compulsory strike-off",
            "date": "2024-02-20",
            "category": "gazette",
            "subcategory": "compulsory"
        }))
        .unwrap();
        let filing = normalize_filing(&raw);
        assert_eq!(filing.filing_type, "GAZ1");
        assert_eq!(filing.filed_on, date(2024, 2, 20));
        assert_eq!(filing.subcategory.as_deref(), Some("compulsory"));

        let raw: RawFiling =
            serde_json::from_value(json!({ "subcategory": ["resolution", "capital"] })).unwrap();
        assert_eq!(
            normalize_filing(&raw).subcategory.as_deref(),
            Some("resolution, capital")
        );

        let filing = normalize_filing(&RawFiling::default());
        assert_eq!(filing.transaction_id, "");
        assert_eq!(filing.description, "");
        assert_eq!(filing.subcategory, None);
    }

    #[test]
    fn test_normalize_search_item() {
        let raw: RawSearchItem = serde_json::from_value(json!({
            "company_number": "SC123456",
            "title": "HIGHLAND HOMES LTD",
            "company_status": "dissolved",
            "company_type": "ltd",
            "address_snippet": "1 Castle Street, Edinburgh, EH1 2AB",
            "date_of_creation": "2001-01-01"
        }))
        .unwrap();
        let summary = normalize_search_item(&raw);
        assert_eq!(summary.company_number, "SC123456");
        assert_eq!(summary.status, CompanyStatus::Dissolved);
        assert_eq!(summary.incorporated_on, date(2001, 1, 1));
    }
}
