//! account_map tool implementation.
//!
//! Places accounts from the configured billing countries on the map.

use geomap_core::{MapService, NamedPoint};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Input parameters for account_map tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AccountMapParams {
    /// Maximum number of accounts to load (default: 100).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Output structure for account_map tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AccountMapOutput {
    pub located: usize,
    /// Account locations labelled with their billing country.
    pub locations: Vec<NamedPoint>,
}

pub async fn account_map_impl(service: &MapService, params: AccountMapParams) -> Result<CallToolResult, McpError> {
    let locations = service.account_locations(params.limit).await?;
    json_result(&AccountMapOutput { located: locations.len(), locations })
}
