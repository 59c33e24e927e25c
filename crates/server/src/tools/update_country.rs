//! update_country tool implementation.
//!
//! Reverse geocodes a dropped map marker and moves every account billed in the
//! old country to the country found there. This is an unguarded bulk update.

use geomap_core::{Coordinate, MapService};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for update_country tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCountryParams {
    /// Billing country currently shown at the wrong position (e.g. "NL").
    #[serde(alias = "currentCountry")]
    pub current_country: String,

    /// Latitude where the marker was dropped.
    pub lat: f64,

    /// Longitude where the marker was dropped.
    pub lng: f64,
}

/// Implementation of the update_country tool.
pub async fn update_country_impl(service: &MapService, params: UpdateCountryParams) -> Result<CallToolResult, McpError> {
    let at = Coordinate::new(params.lat, params.lng);
    let correction = service.correct_country(&params.current_country, at).await.inspect_err(|e| {
        tracing::warn!(current = %params.current_country, error = %e, "country correction failed");
    })?;

    json_result(&correction)
}
