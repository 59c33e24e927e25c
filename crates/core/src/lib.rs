//! Core types and shared functionality for geomap.
//!
//! This crate provides:
//! - Geocode cache with SQLite backend
//! - Record store access for contacts and accounts
//! - The resolution, batching and aggregation pipeline
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod geocode;
mod migrations;
pub mod model;
pub mod pipeline;
pub mod store;

pub use cache::{AddressKey, CacheDb, CachedGeocode};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use geocode::{ForwardGeocoder, GeocodeClient, LookupError, ReverseGeocodeClient, ReverseGeocoder};
pub use model::{Coordinate, CountryCorrection, CountryName, CountryPoint, NamedPoint};
pub use pipeline::{MapService, MapSettings};
pub use store::{RecordSource, SqliteRecordStore};
