//! Client code for geomap.
//!
//! This crate provides the HTTP geocoding client that backs the forward and
//! reverse geocoding boundaries defined in `geomap-core`.

pub mod nominatim;

pub use nominatim::{NominatimClient, NominatimConfig, NominatimError};
