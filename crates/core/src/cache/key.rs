//! Normalized address keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cache identity of an address text.
///
/// Segments are split on `,`, trimmed, whitespace-collapsed and lowercased, so
/// texts that differ only in spacing or case share one cache row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn from_text(text: &str) -> Self {
        let segments: Vec<String> = text
            .split(',')
            .map(|segment| segment.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
            .collect();

        if segments.iter().all(String::is_empty) {
            return Self(String::new());
        }
        Self(segments.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key never reaches the cache or the geocoder.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
