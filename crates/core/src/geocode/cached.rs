use std::sync::Arc;

use super::ForwardGeocoder;
use crate::cache::{AddressKey, CacheDb};
use crate::model::Coordinate;

/// Forward geocoding backed by the persistent cache.
///
/// A cache hit never reaches the external service. Every failure collapses to
/// `None` so one bad address cannot sink a batch.
#[derive(Clone)]
pub struct GeocodeClient {
    cache: CacheDb,
    geocoder: Arc<dyn ForwardGeocoder>,
}

impl GeocodeClient {
    pub fn new(cache: CacheDb, geocoder: Arc<dyn ForwardGeocoder>) -> Self {
        Self { cache, geocoder }
    }

    pub async fn resolve(&self, address_text: &str) -> Option<Coordinate> {
        let key = AddressKey::from_text(address_text);
        if key.is_empty() {
            return None;
        }

        match self.cache.get_geocode(&key).await {
            Ok(Some(hit)) => {
                tracing::debug!(address = %key, "geocode cache hit");
                return Some(hit);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(address = %key, error = %e, "geocode cache read failed, treating as miss"),
        }

        let at = match self.geocoder.forward(address_text).await {
            Ok(at) => at,
            Err(e) => {
                tracing::debug!(address = %key, error = %e, "forward geocode failed");
                return None;
            }
        };

        if !at.is_valid() {
            tracing::warn!(address = %key, lat = at.lat, lon = at.lon, "geocoder returned out-of-range coordinate");
            return None;
        }

        if let Err(e) = self.cache.put_geocode(&key, at).await {
            tracing::warn!(address = %key, error = %e, "failed to persist geocode");
        }

        Some(at)
    }
}
