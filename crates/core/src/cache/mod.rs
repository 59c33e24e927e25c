//! SQLite-backed geocode cache.
//!
//! This module provides a persistent fact store of resolved addresses using
//! SQLite with async access via tokio-rusqlite. It supports:
//!
//! - Normalized address keys shared by the read and write paths
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Idempotent upserts from concurrent resolutions

pub mod connection;
pub mod geocodes;
pub mod key;

pub use crate::Error;

pub use connection::CacheDb;
pub use geocodes::CachedGeocode;
pub use key::AddressKey;
