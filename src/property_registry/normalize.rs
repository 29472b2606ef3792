//! Normalization functions for land registry data

use super::postcode::format_postcode;
use super::types::{RawCharge, RawPricePaid, RawProprietor, RawRestriction, RawTitle};
use crate::model::{Charge, PriceObservation, Proprietor, Restriction, Tenure, TitleRecord};
use crate::normalize::{optional_text, parse_date, text};

pub fn normalize_title(raw: &RawTitle) -> TitleRecord {
    TitleRecord {
        title_number: text(&raw.title_number),
        address: text(&raw.property_address),
        tenure: Tenure::parse(&text(&raw.tenure)),
        proprietors: raw
            .proprietors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_proprietor)
            .collect(),
        charges: raw
            .charges
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_charge)
            .collect(),
        restrictions: raw
            .restrictions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_restriction)
            .collect(),
        price_history: raw
            .price_paid
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_price_paid)
            .collect(),
    }
}

fn normalize_proprietor(raw: &RawProprietor) -> Proprietor {
    Proprietor {
        name: text(&raw.name),
        address: text(&raw.address),
    }
}

fn normalize_charge(raw: &RawCharge) -> Charge {
    Charge {
        charge_type: text(&raw.charge_type),
        charged_on: parse_date(raw.date.as_deref()),
        detail: text(&raw.details),
    }
}

fn normalize_restriction(raw: &RawRestriction) -> Restriction {
    Restriction {
        restriction_type: text(&raw.restriction_type),
        detail: text(&raw.details),
    }
}

pub fn normalize_price_paid(raw: &RawPricePaid) -> PriceObservation {
    let postcode = optional_text(&raw.postcode)
        .map(|p| format_postcode(&p))
        .unwrap_or_default();

    let address = optional_text(&raw.address).unwrap_or_else(|| {
        [&raw.saon, &raw.paon, &raw.street, &raw.town]
            .into_iter()
            .filter_map(optional_text)
            .chain((!postcode.is_empty()).then(|| postcode.clone()))
            .collect::<Vec<_>>()
            .join(", ")
    });

    PriceObservation {
        postcode,
        address,
        sold_on: parse_date(raw.date.as_deref()),
        price: raw.price.get(),
        property_type: text(&raw.property_type),
        new_build: raw.new_build.unwrap_or(false),
        tenure: Tenure::parse(&text(&raw.tenure)),
        paon: text(&raw.paon),
        saon: text(&raw.saon),
        street: text(&raw.street),
        locality: text(&raw.locality),
        town: text(&raw.town),
        district: text(&raw.district),
        county: text(&raw.county),
    }
}
