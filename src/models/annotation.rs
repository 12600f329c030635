use super::{GeoPoint, Place};

/// Point-in-time map marker for a place.
///
/// Copies the coordinate and title when created; later enrichment of the
/// source place is not reflected here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceAnnotation {
    pub coordinate: GeoPoint,
    pub title: String,
}

impl PlaceAnnotation {
    pub fn new(coordinate: GeoPoint, title: String) -> Self {
        Self { coordinate, title }
    }

    pub fn from_place(place: &Place) -> Self {
        Self::new(place.location(), place.place_name().to_string())
    }
}
