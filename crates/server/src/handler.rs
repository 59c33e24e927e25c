//! MCP server handler implementation.
//!
//! Routes tool calls to the map operations and the geocode cache.
use std::sync::Arc;

use crate::tools::{
    AccountMapParams, CacheGetParams, ContactMapParams, CountryMapParams, UpdateCountryParams, account_map_impl,
    contact_map_impl, country_map_impl, get_impl, update_country_impl,
};
use geomap_core::{CacheDb, MapService};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for geomap.
#[derive(Clone)]
pub struct GeomapServer {
    tool_router: ToolRouter<Self>,
    service: Arc<MapService>,
    cache: CacheDb,
}

#[tool_router]
impl GeomapServer {
    pub fn new(service: MapService, cache: CacheDb) -> Self {
        Self { tool_router: Self::tool_router(), service: Arc::new(service), cache }
    }

    #[tool(description = "Geocode contacts by mailing address. Returns named map points for contacts that could be placed.")]
    async fn contact_map(&self, params: Parameters<ContactMapParams>) -> Result<CallToolResult, McpError> {
        contact_map_impl(&self.service, params.0).await
    }

    #[tool(description = "Geocode accounts billed in the configured countries. Returns points labelled with the billing country.")]
    async fn account_map(&self, params: Parameters<AccountMapParams>) -> Result<CallToolResult, McpError> {
        account_map_impl(&self.service, params.0).await
    }

    /// Country positions with account counts.
    #[tool(description = "Locate the configured countries and attach the number of accounts billed in each.")]
    async fn country_map(&self, params: Parameters<CountryMapParams>) -> Result<CallToolResult, McpError> {
        country_map_impl(&self.service, params.0).await
    }

    /// Bulk billing-country correction from a dropped marker.
    ///
    /// Every account billed in `current_country` is moved, not just one.
    #[tool(
        description = "Reverse geocode a coordinate and move every account billed in current_country to the country found there."
    )]
    async fn update_country(&self, params: Parameters<UpdateCountryParams>) -> Result<CallToolResult, McpError> {
        update_country_impl(&self.service, params.0).await
    }

    #[tool(description = "Look up the cached geocode for an address text. Returns an error if it has not been resolved yet.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.cache, params.0).await
    }
}

impl ServerHandler for GeomapServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "geomap".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Contact, account and country maps backed by a persistent geocode cache.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
