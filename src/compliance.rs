//! Company compliance verification
//!
//! Produces a [`ComplianceVerdict`] from the company profile and its most
//! recent filings. The rule set is fixed and evaluated in order:
//!
//! | # | Rule | Issue |
//! |---|------|-------|
//! | 1 | accounts due date strictly before now | `Accounts are overdue` |
//! | 2 | confirmation statement due date strictly before now | `Confirmation statement is overdue` |
//! | 3 | a recent filing mentions "strike" or "dissolution" | `Recent strike-off or dissolution notice found` |
//!
//! The company and filing-history fetches are independent and run
//! concurrently. Either failing aborts the verification; there is no partial
//! verdict.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::instrument;

use crate::company_registry::{normalize_company_number, CompanyRegistryClient};
use crate::error::{Operation, Registry, RegistryError};
use crate::model::{CompanyRecord, ComplianceVerdict, FilingEntry};

pub const ACCOUNTS_OVERDUE: &str = "Accounts are overdue";
pub const CONFIRMATION_STATEMENT_OVERDUE: &str = "Confirmation statement is overdue";
pub const STRIKE_OFF_NOTICE: &str = "Recent strike-off or dissolution notice found";

/// How many of the most recent filings rule 3 looks at.
pub const RECENT_FILINGS_CHECKED: usize = 10;

pub struct ComplianceVerifier {
    client: CompanyRegistryClient,
    deadline: Option<Duration>,
}

impl ComplianceVerifier {
    pub fn new(client: CompanyRegistryClient) -> Self {
        Self {
            client,
            deadline: None,
        }
    }

    /// Bound the whole verification. When it runs out, both registry calls
    /// are dropped and a timeout error is returned.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub async fn verify(&self, company_number: &str) -> Result<ComplianceVerdict, RegistryError> {
        self.verify_at(company_number, Utc::now()).await
    }

    /// Verify against an explicit "now".
    #[instrument(skip(self), fields(deadline = ?self.deadline))]
    pub async fn verify_at(
        &self,
        company_number: &str,
        now: DateTime<Utc>,
    ) -> Result<ComplianceVerdict, RegistryError> {
        let fetch = async {
            tokio::try_join!(
                self.client.fetch_company(company_number),
                self.client
                    .fetch_filing_history(company_number, RECENT_FILINGS_CHECKED),
            )
        };

        let (company, filings) = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fetch).await.map_err(|_| {
                tracing::warn!(company_number, ?deadline, "compliance verification timed out");
                RegistryError::deadline_exceeded(
                    Registry::Company,
                    Operation::VerifyCompliance,
                    format!("/company/{}", normalize_company_number(company_number)),
                    deadline,
                )
            })??,
            None => fetch.await?,
        };

        let verdict = evaluate(&company, &filings, now);
        tracing::info!(
            company_number = %company.company_number,
            status = %verdict.status_label,
            good_standing = verdict.is_in_good_standing,
            issues = verdict.issues.len(),
            "compliance verdict"
        );
        Ok(verdict)
    }
}

/// Apply the rule set to already-fetched data.
///
/// Only the first [`RECENT_FILINGS_CHECKED`] filings are considered.
pub fn evaluate(
    company: &CompanyRecord,
    filings: &[FilingEntry],
    now: DateTime<Utc>,
) -> ComplianceVerdict {
    let mut issues = Vec::new();

    if is_before(company.accounts_due, now) {
        issues.push(ACCOUNTS_OVERDUE.to_string());
    }
    if is_before(company.confirmation_statement_due, now) {
        issues.push(CONFIRMATION_STATEMENT_OVERDUE.to_string());
    }
    if filings
        .iter()
        .take(RECENT_FILINGS_CHECKED)
        .any(FilingEntry::mentions_strike_off)
    {
        issues.push(STRIKE_OFF_NOTICE.to_string());
    }

    ComplianceVerdict::new(company.status.is_active(), company.status.as_str(), issues)
}

/// A due date counts from midnight UTC, so a date due today is already
/// before any instant later that day.
fn is_before(due: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    due.is_some_and(|date| date.and_time(NaiveTime::MIN).and_utc() < now)
}
