//! Location fixes and the accuracy gate.

mod gate;
mod source;

pub use gate::{
    GateDecision, LocationGate, LocationUpdate, MAX_HORIZONTAL_ACCURACY_M, REGION_SPAN_DEG,
};
pub use source::LocationSource;
