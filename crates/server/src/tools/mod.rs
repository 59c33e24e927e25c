//! MCP tool implementations.
//!
//! This module contains all tools exposed by the geomap server.

pub mod account_map;
pub mod cache_get;
pub mod contact_map;
pub mod country_map;
pub mod update_country;

pub use account_map::{AccountMapParams, account_map_impl};
pub use cache_get::{CacheGetParams, get_impl};
pub use contact_map::{ContactMapParams, contact_map_impl};
pub use country_map::{CountryMapParams, country_map_impl};
pub use update_country::{UpdateCountryParams, update_country_impl};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialize a tool output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
