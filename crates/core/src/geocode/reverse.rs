use std::sync::Arc;

use super::{LookupError, ReverseGeocoder};
use crate::model::{Coordinate, CountryName, normalize_code};

/// Uncached reverse geocoding used by the country correction flow.
#[derive(Clone)]
pub struct ReverseGeocodeClient {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl ReverseGeocodeClient {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Country at `at`, with the short code upper-cased.
    ///
    /// A coordinate over open water or outside any country is `NotFound`.
    pub async fn country_at(&self, at: Coordinate) -> Result<CountryName, LookupError> {
        let found = self.geocoder.reverse(at).await?;
        let short_code = normalize_code(&found.short_code);
        if short_code.is_empty() {
            return Err(LookupError::NotFound);
        }

        tracing::debug!(lat = at.lat, lon = at.lon, country = %short_code, "reverse geocode resolved");
        Ok(CountryName { short_code, long_name: found.long_name.trim().to_string() })
    }
}
