//! Nominatim query parameters.

use serde::Serialize;

use super::NominatimError;

/// Longest free-form query we send; Nominatim rejects much longer ones anyway.
const MAX_QUERY_LEN: usize = 512;

/// Reverse lookups at this zoom resolve to country level.
const COUNTRY_ZOOM: u8 = 3;

/// `GET /search` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub q: String,
    pub format: &'static str,
    pub limit: u8,
}

impl SearchRequest {
    pub fn new(q: &str) -> Self {
        Self { q: q.trim().to_string(), format: "jsonv2", limit: 1 }
    }

    pub fn validate(&self) -> Result<(), NominatimError> {
        if self.q.trim_matches(|c: char| c == ',' || c.is_whitespace()).is_empty() {
            return Err(NominatimError::InvalidQuery("query cannot be empty".to_string()));
        }
        if self.q.len() > MAX_QUERY_LEN {
            return Err(NominatimError::InvalidQuery(format!(
                "query too long: {} chars (max {MAX_QUERY_LEN})",
                self.q.len()
            )));
        }
        Ok(())
    }
}

/// `GET /reverse` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ReverseRequest {
    pub lat: f64,
    pub lon: f64,
    pub format: &'static str,
    pub zoom: u8,
    pub addressdetails: u8,
}

impl ReverseRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, format: "jsonv2", zoom: COUNTRY_ZOOM, addressdetails: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_trims() {
        let req = SearchRequest::new("  Utrecht ");
        assert_eq!(req.q, "Utrecht");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_request_rejects_blank() {
        assert!(matches!(SearchRequest::new(" , ,").validate(), Err(NominatimError::InvalidQuery(_))));
    }

    #[test]
    fn test_search_request_rejects_long() {
        let req = SearchRequest::new(&"a".repeat(MAX_QUERY_LEN + 1));
        assert!(matches!(req.validate(), Err(NominatimError::InvalidQuery(_))));
    }
}
