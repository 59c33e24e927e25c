//! The resolution and aggregation pipeline.
//!
//! Records flow from the [`RecordSource`](crate::store::RecordSource) through
//! [`LocationResolver`] under [`map_all`], and country points are completed by
//! [`CountAggregator`]. [`MapService`] wires these into the map views.

pub mod aggregate;
pub mod batch;
pub mod resolver;
pub mod service;

pub use aggregate::{CountAggregator, merge_counts};
pub use batch::map_all;
pub use resolver::LocationResolver;
pub use service::{MapService, MapSettings};
