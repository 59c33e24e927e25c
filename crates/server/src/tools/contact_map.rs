//! contact_map tool implementation.
//!
//! Geocodes contacts by mailing address and returns the ones that could be placed.

use geomap_core::{MapService, NamedPoint};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for contact_map tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ContactMapParams {
    /// Maximum number of contacts to load (default: 200).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output structure for contact_map tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContactMapOutput {
    /// Number of contacts placed on the map.
    pub located: usize,
    /// Contact locations with escaped names.
    pub locations: Vec<NamedPoint>,
}

/// Implementation of the contact_map tool.
pub async fn contact_map_impl(service: &MapService, params: ContactMapParams) -> Result<CallToolResult, McpError> {
    let locations = service.contact_locations(params.limit).await?;
    json_result(&ContactMapOutput { located: locations.len(), locations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{StubGeocoder, output_json, service_with};

    #[tokio::test]
    async fn test_contact_map_empty_store() {
        let (service, _cache) = service_with(StubGeocoder::default()).await;

        let result = contact_map_impl(&service, ContactMapParams::default()).await.unwrap();
        let json = output_json(&result);
        assert_eq!(json["located"], 0);
        assert!(json["locations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contact_map_zero_limit() {
        let (service, _cache) = service_with(StubGeocoder::default()).await;

        let err = contact_map_impl(&service, ContactMapParams { limit: Some(0) }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
