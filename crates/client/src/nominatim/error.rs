//! Nominatim client error types.

use std::sync::Arc;

use geomap_core::LookupError;

/// Errors from the Nominatim geocoding client.
#[derive(Debug, thiserror::Error)]
pub enum NominatimError {
    /// Base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Empty or oversized query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The service rejected our credentials or user agent.
    #[error("authentication failed")]
    AuthError,

    /// Usage policy limit hit.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The query matched nothing.
    #[error("no result")]
    NotFound,
}

impl From<reqwest::Error> for NominatimError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { NominatimError::Timeout } else { NominatimError::Network(Arc::new(err)) }
    }
}

impl From<NominatimError> for LookupError {
    fn from(err: NominatimError) -> Self {
        match err {
            NominatimError::NotFound | NominatimError::InvalidQuery(_) => LookupError::NotFound,
            NominatimError::RateLimited => LookupError::RateLimited,
            other => LookupError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NominatimError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));

        let err = NominatimError::InvalidQuery("empty".to_string());
        assert!(err.to_string().contains("invalid query"));
    }

    #[test]
    fn test_into_lookup_error() {
        assert_eq!(LookupError::from(NominatimError::NotFound), LookupError::NotFound);
        assert_eq!(LookupError::from(NominatimError::RateLimited), LookupError::RateLimited);
        assert!(matches!(LookupError::from(NominatimError::Timeout), LookupError::Unavailable(_)));
    }
}
