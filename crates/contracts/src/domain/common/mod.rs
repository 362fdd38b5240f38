//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod geo_point;

// Re-exports
pub use aggregate_id::AggregateId;
pub use geo_point::GeoPoint;
