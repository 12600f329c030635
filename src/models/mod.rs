//! Core data models for the place discovery pipeline.

pub mod annotation;
pub mod geo;
pub mod place;

pub use annotation::PlaceAnnotation;
pub use geo::{GeoPoint, MapRegion};
pub use place::{Place, PlaceDetail, PlaceRef};
