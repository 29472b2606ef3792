//! UK postcode handling

use regex::Regex;
use std::sync::LazyLock;

static POSTCODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").expect("postcode pattern is valid")
});

/// Upper-case and strip all whitespace. Idempotent.
pub fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// UK postcode shape check, case-insensitive, with or without the single
/// separating space.
pub fn is_valid_postcode(postcode: &str) -> bool {
    POSTCODE_RE.is_match(postcode.trim())
}

/// Display form: outward code, one space, inward code (`SW1A 1AA`).
pub fn format_postcode(postcode: &str) -> String {
    let compact = normalize_postcode(postcode);
    if compact.len() <= 3 || !compact.is_ascii() {
        return compact;
    }
    let (outward, inward) = compact.split_at(compact.len() - 3);
    format!("{} {}", outward, inward)
}
