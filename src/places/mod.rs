//! Places provider: client contract, response bodies and the HTTP client.

mod client;
mod google;
mod response;

pub use client::PlacesClient;
pub use google::GooglePlacesClient;
pub use response::{DetailResponse, SearchResponse};
