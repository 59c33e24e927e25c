//! Domain types shared by the resolution pipeline and the display boundary.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Characters left untouched by [`escape_label`].
const LABEL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'*')
    .remove(b'_')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/');

/// Escape a display label so it can be embedded in rendered markup or script.
pub fn escape_label(label: &str) -> String {
    utf8_percent_encode(label, LABEL_SAFE).to_string()
}

/// Upper-case, trimmed form of a country code used for every comparison.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A resolved, labelled location for the contact and account maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NamedPoint {
    /// Escaped display label.
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl NamedPoint {
    pub fn new(label: &str, at: Coordinate) -> Self {
        Self { name: escape_label(label), lat: at.lat, lon: at.lon }
    }
}

/// A geocoded country with the number of accounts billed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CountryPoint {
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub count: i64,
}

impl CountryPoint {
    pub fn new(code: &str, at: Coordinate) -> Self {
        Self { country: normalize_code(code), lat: at.lat, lon: at.lon, count: 0 }
    }
}

/// One row of the grouped account count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

/// Result of a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountryName {
    /// ISO 3166-1 alpha-2 code, upper-cased.
    pub short_code: String,
    /// Human readable country name.
    pub long_name: String,
}

/// Acknowledgement of a billing-country correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountryCorrection {
    /// Billing country that was replaced.
    pub from: String,
    /// Billing country written in its place.
    pub to: String,
    /// Name of the country found at the dropped coordinate.
    pub country_name: String,
    /// Number of account rows updated.
    pub updated: u64,
}

/// A contact row from the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mailing_street: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
}

impl Contact {
    /// Joined mailing address, or `None` when street, city and state are all empty.
    pub fn address_text(&self) -> Option<String> {
        let parts = [&self.mailing_street, &self.mailing_city, &self.mailing_state];
        if parts.iter().all(|p| is_blank(p)) {
            return None;
        }
        let joined = parts
            .iter()
            .map(|p| p.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        Some(joined)
    }
}

/// An account row from the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub billing_city: Option<String>,
    pub billing_country: Option<String>,
}

impl Account {
    /// Billing country, or `None` when it is empty.
    pub fn country(&self) -> Option<&str> {
        self.billing_country.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Any location-bearing record.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Contact(Contact),
    Account(Account),
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|f| f.trim().is_empty())
}
