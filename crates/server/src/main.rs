//! geomap server entry point.
//!
//! Boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use geomap_client::{NominatimClient, NominatimConfig};
use geomap_core::{AppConfig, CacheDb, MapService, MapSettings, SqliteRecordStore};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        cache = %config.cache_db_path.display(),
        store = %config.store_db_path.display(),
        geocoder = %config.geocoder_base_url,
        "Starting geomap server on stdio transport"
    );

    let cache = CacheDb::open(&config.cache_db_path).await?;
    let store = SqliteRecordStore::open(&config.store_db_path).await?;
    let geocoder = Arc::new(NominatimClient::new(NominatimConfig::from(&config))?);

    let service = MapService::new(Arc::new(store), cache.clone(), geocoder.clone(), geocoder, MapSettings::from(&config));

    let handler = handler::GeomapServer::new(service, cache);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
