//! Nearby - discovers points of interest around the device once a precise
//! enough location fix arrives, and renders them on a 2D map and an AR overlay.
//!
//! This library provides the location-to-annotation pipeline used by the
//! `nearby` binary.

pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod places;
pub mod session;
pub mod surface;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{LocationError, NetworkError, ParseError};
pub use models::{GeoPoint, MapRegion, Place, PlaceAnnotation, PlaceRef};
pub use session::{AnnotationCoordinator, Session, SessionEvent, SessionHandle, SessionState};
