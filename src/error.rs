//! Error types shared across the location, places and session modules.

use thiserror::Error;

/// Failures reported by the location subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The user has not granted location access.
    #[error("location access is not authorized")]
    Unauthorized,

    /// Positioning is temporarily or permanently unavailable.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Failures of a search or detail request against the places provider.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    /// The provider answered but refused the request (e.g. `REQUEST_DENIED`).
    #[error("provider status {status}: {message}")]
    Api { status: String, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A single raw record that cannot be turned into a place.
///
/// Records failing with this error are skipped; the rest of the batch continues.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("missing or mistyped field `{0}`")]
    MissingField(&'static str),

    #[error("coordinate out of range: ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
}
