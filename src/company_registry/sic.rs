//! SIC code descriptions
//!
//! Description lookup is injected into [`super::CompanyRegistryClient`] so a
//! full classification table can replace the built-in one without touching
//! the client.

/// Resolves a SIC code to a human description.
pub trait SicCodeLookup: Send + Sync {
    /// `None` when the code is unknown; the caller then keeps the raw code.
    fn describe(&self, code: &str) -> Option<String>;
}

/// Resolves nothing. Every code's description is the code itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSicLookup;

impl SicCodeLookup for NoSicLookup {
    fn describe(&self, _code: &str) -> Option<String> {
        None
    }
}

/// Built-in table of codes common among property owning, letting and
/// holding companies.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSicLookup;

const SIC_DESCRIPTIONS: &[(&str, &str)] = &[
    ("41100", "Development of building projects"),
    ("41201", "Construction of commercial buildings"),
    ("41202", "Construction of domestic buildings"),
    ("43999", "Other specialised construction activities n.e.c."),
    ("55100", "Hotels and similar accommodation"),
    ("55900", "Other accommodation"),
    ("62020", "Information technology consultancy activities"),
    ("64209", "Activities of other holding companies n.e.c."),
    ("64999", "Financial intermediation not elsewhere classified"),
    ("68100", "Buying and selling of own real estate"),
    ("68201", "Renting and operating of Housing Association real estate"),
    ("68202", "Letting and operating of conference and exhibition centres"),
    ("68209", "Other letting and operating of own or leased real estate"),
    ("68310", "Real estate agencies"),
    ("68320", "Management of real estate on a fee or contract basis"),
    ("70100", "Activities of head offices"),
    ("70229", "Management consultancy activities other than financial management"),
    ("74990", "Non-trading company"),
    ("81100", "Combined facilities support activities"),
    ("82990", "Other business support service activities n.e.c."),
    ("96090", "Other service activities n.e.c."),
    ("98000", "Residents property management"),
    ("99999", "Dormant Company"),
];

impl SicCodeLookup for StaticSicLookup {
    fn describe(&self, code: &str) -> Option<String> {
        let code = code.trim();
        SIC_DESCRIPTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, description)| description.to_string())
    }
}
