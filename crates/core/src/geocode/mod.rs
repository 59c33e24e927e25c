//! Geocoding boundaries and the clients layered on top of them.
//!
//! [`ForwardGeocoder`] and [`ReverseGeocoder`] describe the external service;
//! [`GeocodeClient`] puts the persistent cache in front of forward lookups and
//! [`ReverseGeocodeClient`] normalizes reverse lookups for the correction flow.

mod cached;
mod reverse;

#[cfg(test)]
pub(crate) mod fake;

pub use cached::GeocodeClient;
pub use reverse::ReverseGeocodeClient;

use async_trait::async_trait;

use crate::model::{Coordinate, CountryName};

/// Failure of a single external lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The service answered but had no usable match.
    #[error("no result")]
    NotFound,

    /// The service refused the request because of quota or rate limits.
    #[error("rate limited")]
    RateLimited,

    /// The service could not be reached or answered with garbage.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Address text to coordinate.
#[async_trait]
pub trait ForwardGeocoder: Send + Sync {
    async fn forward(&self, address: &str) -> Result<Coordinate, LookupError>;
}

/// Coordinate to country.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, at: Coordinate) -> Result<CountryName, LookupError>;
}
