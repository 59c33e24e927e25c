//! country_map tool implementation.
//!
//! Geocodes the configured countries and attaches per-country account counts.

use std::collections::BTreeMap;

use geomap_core::{CountryPoint, MapService};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for country_map tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CountryMapParams {}

/// Output structure for country_map tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CountryMapOutput {
    /// Country points keyed by ISO code.
    pub countries: BTreeMap<String, CountryPoint>,
}

/// Implementation of the country_map tool.
pub async fn country_map_impl(service: &MapService, _params: CountryMapParams) -> Result<CallToolResult, McpError> {
    let countries = service.country_map().await?;
    json_result(&CountryMapOutput { countries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{StubGeocoder, output_json, service_with};
    use geomap_core::Coordinate;

    #[tokio::test]
    async fn test_country_map_lists_resolved_countries() {
        let mut stub = StubGeocoder::default();
        stub.places.insert("DE".into(), Coordinate::new(51.1, 10.4));
        stub.places.insert("FR".into(), Coordinate::new(46.2, 2.2));
        let (service, _cache) = service_with(stub).await;

        let result = country_map_impl(&service, CountryMapParams::default()).await.unwrap();
        let json = output_json(&result);

        let countries = json["countries"].as_object().unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(json["countries"]["DE"]["count"], 0);
        assert_eq!(json["countries"]["FR"]["lat"], 46.2);
    }
}
