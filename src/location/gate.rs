//! Accuracy gate deciding when a fix is good enough to act on.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{GeoPoint, MapRegion};

/// Fixes at or above this horizontal accuracy are ignored.
pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 100.0;

/// Angular span of the map region centered on each accepted fix.
pub const REGION_SPAN_DEG: f64 = 0.014;

/// One location fix from the positioning subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationUpdate {
    pub coordinate: GeoPoint,
    pub horizontal_accuracy_m: f64,
    pub timestamp: DateTime<Utc>,
}

impl LocationUpdate {
    pub fn new(coordinate: GeoPoint, horizontal_accuracy_m: f64) -> Self {
        Self {
            coordinate,
            horizontal_accuracy_m,
            timestamp: Utc::now(),
        }
    }
}

/// What to do with a location update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    /// Fix too imprecise
    Ignore,
    /// Re-center the map
    Center(MapRegion),
    /// Re-center, stop listening for location and start the one-time search
    CenterAndTrigger(MapRegion),
}

impl GateDecision {
    pub fn region(&self) -> Option<MapRegion> {
        match self {
            GateDecision::Ignore => None,
            GateDecision::Center(r) | GateDecision::CenterAndTrigger(r) => Some(*r),
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, GateDecision::CenterAndTrigger(_))
    }
}

/// Evaluates the update stream. The only state kept is the most recent
/// accepted fix; the trigger fires on the first one.
#[derive(Debug, Default)]
pub struct LocationGate {
    last_accepted: Option<LocationUpdate>,
}

impl LocationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, update: LocationUpdate) -> GateDecision {
        debug!("Accuracy: {}", update.horizontal_accuracy_m);

        let accuracy = update.horizontal_accuracy_m;
        if accuracy.is_nan() || accuracy >= MAX_HORIZONTAL_ACCURACY_M {
            return GateDecision::Ignore;
        }

        let region = MapRegion::new(update.coordinate, REGION_SPAN_DEG, REGION_SPAN_DEG);
        let first = self.last_accepted.replace(update).is_none();

        if first {
            GateDecision::CenterAndTrigger(region)
        } else {
            GateDecision::Center(region)
        }
    }

    pub fn last_accepted(&self) -> Option<&LocationUpdate> {
        self.last_accepted.as_ref()
    }

    pub fn has_triggered(&self) -> bool {
        self.last_accepted.is_some()
    }
}
