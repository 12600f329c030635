//! Normalized point of interest.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::GeoPoint;
use crate::error::ParseError;

/// Shared handle to a place. Detail enrichment mutates through this handle,
/// so every holder (coordinator, AR snapshot, annotation views) sees it.
pub type PlaceRef = Arc<Place>;

/// Detail fields filled lazily by a detail lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetail {
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

/// A point of interest returned by a nearby search.
///
/// Location, reference, name and address are fixed at creation. Only the
/// detail fields change, and only through [`Place::apply_detail`].
#[derive(Debug)]
pub struct Place {
    location: GeoPoint,

    /// Provider-assigned key for detail lookups
    reference: String,

    name: String,

    /// Short address ("vicinity" in provider terms)
    address: String,

    detail: RwLock<PlaceDetail>,
}

impl Place {
    pub fn new(location: GeoPoint, reference: String, name: String, address: String) -> Self {
        Self {
            location,
            reference,
            name,
            address,
            detail: RwLock::new(PlaceDetail::default()),
        }
    }

    /// Parse one raw search record:
    /// `{geometry: {location: {lat, lng}}, reference, name, vicinity}`
    pub fn from_record(record: &Value) -> Result<Self, ParseError> {
        let location = &record["geometry"]["location"];
        let lat = location["lat"]
            .as_f64()
            .ok_or(ParseError::MissingField("geometry.location.lat"))?;
        let lon = location["lng"]
            .as_f64()
            .ok_or(ParseError::MissingField("geometry.location.lng"))?;

        Ok(Self::new(
            GeoPoint::checked(lat, lon)?,
            get_str(record, "reference")?,
            get_str(record, "name")?,
            get_str(record, "vicinity")?,
        ))
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Display name (title of annotations and info views)
    pub fn place_name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<String> {
        self.detail.read().phone_number.clone()
    }

    pub fn website(&self) -> Option<String> {
        self.detail.read().website.clone()
    }

    pub fn detail(&self) -> PlaceDetail {
        self.detail.read().clone()
    }

    /// Replace both detail fields with the latest lookup result.
    ///
    /// A field absent from `detail` clears any earlier value, so applying the
    /// same response twice leaves the place unchanged.
    pub fn apply_detail(&self, detail: PlaceDetail) {
        *self.detail.write() = detail;
    }

    /// Address, phone and website composed for display.
    pub fn info_text(&self) -> String {
        let detail = self.detail.read();
        let mut info = format!("Address: {}", self.address);
        if let Some(ref phone) = detail.phone_number {
            info.push_str(&format!("\nPhone: {}", phone));
        }
        if let Some(ref website) = detail.website {
            info.push_str(&format!("\nWebsite: {}", website));
        }
        info
    }
}

fn get_str(record: &Value, key: &'static str) -> Result<String, ParseError> {
    record[key]
        .as_str()
        .map(String::from)
        .ok_or(ParseError::MissingField(key))
}
