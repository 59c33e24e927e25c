//! Nominatim response types and normalization.

use geomap_core::{Coordinate, CountryName};
use serde::Deserialize;

use super::NominatimError;

/// One `/search` hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
pub struct SearchPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchPlace {
    pub fn coordinate(&self) -> Result<Coordinate, NominatimError> {
        let lat = self
            .lat
            .parse::<f64>()
            .map_err(|e| NominatimError::Parse(format!("lat {:?}: {e}", self.lat)))?;
        let lon = self
            .lon
            .parse::<f64>()
            .map_err(|e| NominatimError::Parse(format!("lon {:?}: {e}", self.lon)))?;
        Ok(Coordinate::new(lat, lon))
    }
}

/// `/reverse` body. A miss comes back as 200 with only `error` set.
#[derive(Debug, Deserialize)]
pub struct ReversePlace {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub address: Option<ReverseAddress>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseAddress {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl TryFrom<ReversePlace> for CountryName {
    type Error = NominatimError;

    fn try_from(place: ReversePlace) -> Result<Self, Self::Error> {
        if let Some(message) = place.error {
            tracing::debug!("reverse lookup miss: {}", message);
            return Err(NominatimError::NotFound);
        }

        let address = place.address.ok_or(NominatimError::NotFound)?;
        let short_code = address
            .country_code
            .filter(|c| !c.trim().is_empty())
            .ok_or(NominatimError::NotFound)?
            .to_uppercase();
        let long_name = address.country.unwrap_or_else(|| short_code.clone());

        Ok(CountryName { short_code, long_name })
    }
}
