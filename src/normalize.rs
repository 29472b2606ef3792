//! Shared helpers for turning raw registry payloads into the internal model.
//!
//! Normalization never fails on a missing optional field. The only failure is
//! a body that is not the expected raw shape at all.

use crate::error::NormalizationError;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// List endpoints of both registries wrap their rows in `items`. A missing
/// or null `items` is an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList<T> {
    pub items: Option<Vec<T>>,
}

impl<T> ItemList<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Deserialize a response body into its raw shape.
pub fn parse_payload<T: DeserializeOwned>(
    shape: &'static str,
    body: &str,
) -> Result<T, NormalizationError> {
    serde_json::from_str(body).map_err(|e| NormalizationError::new(shape, e))
}

/// `YYYY-MM-DD`; absent, blank or unparseable input gives `None`.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    // some feeds append a time component
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(value = raw, "unparseable registry date");
            None
        }
    }
}

/// Owned string or empty.
pub fn text(raw: &Option<String>) -> String {
    raw.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Trimmed, non-empty string or `None`.
pub fn optional_text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
