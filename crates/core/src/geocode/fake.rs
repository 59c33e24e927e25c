//! In-process geocoder for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{ForwardGeocoder, LookupError, ReverseGeocoder};
use crate::model::{Coordinate, CountryName};

#[derive(Default)]
pub(crate) struct FakeGeocoder {
    places: HashMap<String, Coordinate>,
    country: Option<CountryName>,
    rate_limited: bool,
    delay: Option<Duration>,
    forward_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub(crate) fn with_place(mut self, address: &str, at: Coordinate) -> Self {
        self.places.insert(address.to_string(), at);
        self
    }

    pub(crate) fn with_country(mut self, short_code: &str, long_name: &str) -> Self {
        self.country = Some(CountryName { short_code: short_code.into(), long_name: long_name.into() });
        self
    }

    pub(crate) fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForwardGeocoder for FakeGeocoder {
    async fn forward(&self, address: &str) -> Result<Coordinate, LookupError> {
        self.forward_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.rate_limited {
            return Err(LookupError::RateLimited);
        }
        self.places.get(address).copied().ok_or(LookupError::NotFound)
    }
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn reverse(&self, _at: Coordinate) -> Result<CountryName, LookupError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        self.country.clone().ok_or(LookupError::NotFound)
    }
}
