//! Nominatim geocoding client.
//!
//! Provides forward (`/search`) and reverse (`/reverse`) lookups against a
//! Nominatim-compatible API, implementing the geocoding boundaries from
//! `geomap-core`.
//!
//! ### Usage policy
//!
//! - **Identification**: every request carries the configured User-Agent.
//! - **Rate Limiting**: at most one request per configured interval (1s for the
//!   public instance), shared across clones of the client.
//! - **No retries**: a 429 is reported as rate limited and left to the caller.

pub mod error;
pub mod request;
pub mod response;

pub use error::NominatimError;
pub use request::{ReverseRequest, SearchRequest};
pub use response::{ReverseAddress, ReversePlace, SearchPlace};

use async_trait::async_trait;
use geomap_core::{AppConfig, Coordinate, CountryName, ForwardGeocoder, LookupError, ReverseGeocoder};
use reqwest::{StatusCode, header};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

/// Default base URL of the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "geomap/0.1";

/// Minimum interval between requests required by the public instance.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Nominatim client configuration.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL (default: https://nominatim.openstreetmap.org).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: geomap/0.1).
    pub user_agent: String,
    /// Minimum spacing between requests (default: 1s, zero disables).
    pub min_interval: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}

impl From<&AppConfig> for NominatimConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.geocoder_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            min_interval: config.rate_limit(),
        }
    }
}

/// Rate limiter to enforce request intervals.
#[derive(Debug)]
struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now().checked_sub(min_interval).unwrap_or_else(Instant::now)),
            min_interval,
        }
    }

    /// Acquire permission to make a request, waiting if necessary.
    async fn acquire(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// Nominatim API client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: Url,
    rate_limiter: Arc<RateLimiter>,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, NominatimError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| NominatimError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(NominatimError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NominatimError::Network(Arc::new(e)))?;

        Ok(Self { http, base_url, rate_limiter: Arc::new(RateLimiter::new(config.min_interval)) })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Geocode free-form address text to the best matching coordinate.
    pub async fn search(&self, address: &str) -> Result<Coordinate, NominatimError> {
        let req = SearchRequest::new(address);
        req.validate()?;

        tracing::debug!("searching Nominatim: q={}", req.q);
        let places: Vec<SearchPlace> = self.get_json("search", &req).await?;

        let place = places.first().ok_or(NominatimError::NotFound)?;
        tracing::debug!("resolved {:?} to {:?}", req.q, place.display_name);
        place.coordinate()
    }

    /// Find the country containing `at`.
    pub async fn reverse_country(&self, at: Coordinate) -> Result<CountryName, NominatimError> {
        let req = ReverseRequest::new(at.lat, at.lon);

        tracing::debug!("reverse geocoding via Nominatim: lat={} lon={}", req.lat, req.lon);
        let place: ReversePlace = self.get_json("reverse", &req).await?;

        CountryName::try_from(place)
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Result<T, NominatimError>
    where
        Q: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        self.rate_limiter.acquire().await;

        let start = Instant::now();
        let response = self
            .http
            .get(self.endpoint(path))
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Nominatim {} responded {} in {:?}", path, status, start.elapsed());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NominatimError::AuthError);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NominatimError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(NominatimError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| NominatimError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ForwardGeocoder for NominatimClient {
    async fn forward(&self, address: &str) -> Result<Coordinate, LookupError> {
        self.search(address).await.map_err(LookupError::from)
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, at: Coordinate) -> Result<CountryName, LookupError> {
        self.reverse_country(at).await.map_err(LookupError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { rate_limit_ms: 0, user_agent: "geomap-test".into(), ..Default::default() };
        let config = NominatimConfig::from(&app);
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.user_agent, "geomap-test");
        assert!(config.min_interval.is_zero());
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let config = NominatimConfig { base_url: "not a url".into(), ..Default::default() };
        assert!(matches!(NominatimClient::new(config), Err(NominatimError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let config = NominatimConfig { base_url: "http://localhost:8080/nominatim/".into(), ..Default::default() };
        let client = NominatimClient::new(config).unwrap();
        assert_eq!(client.endpoint("search"), "http://localhost:8080/nominatim/search");
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let config = NominatimConfig { base_url: "http://127.0.0.1:9".into(), ..Default::default() };
        let client = NominatimClient::new(config).unwrap();
        assert!(matches!(client.search(" , ").await, Err(NominatimError::InvalidQuery(_))));
    }
}
