use async_trait::async_trait;

use super::{DetailResponse, SearchResponse};
use crate::error::NetworkError;
use crate::models::GeoPoint;

/// Remote POI provider.
///
/// Both calls are single-shot; retries and backoff belong to the transport.
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Nearby search around `center`.
    async fn search(
        &self,
        center: GeoPoint,
        radius_m: u32,
    ) -> Result<SearchResponse, NetworkError>;

    /// Detail lookup keyed by a place's provider reference.
    async fn fetch_detail(&self, reference: &str) -> Result<DetailResponse, NetworkError>;
}
