//! cache_get tool implementation.
//!
//! Looks up the cached geocode for an address text.

use geomap_core::{AddressKey, CacheDb, CachedGeocode, Error};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Address text as it would be geocoded (e.g. "1 Main St,Springfield,IL" or "NL").
    pub address: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The cached geocode.
    pub geocode: CachedGeocode,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(cache: &CacheDb, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let key = AddressKey::from_text(&params.address);
    if key.is_empty() {
        return Err(Error::InvalidInput("address cannot be empty".into()).into());
    }

    let geocode = cache
        .get_geocode_row(&key)
        .await?
        .ok_or_else(|| Error::CacheMiss(key.to_string()))?;

    json_result(&CacheGetOutput { geocode })
}
