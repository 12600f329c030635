//! Owner of the session's places and the one-time search.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ArConfig;
use crate::error::NetworkError;
use crate::models::{GeoPoint, Place, PlaceAnnotation, PlaceRef};
use crate::places::{DetailResponse, PlacesClient, SearchResponse};
use crate::surface::{ArDelegate, SurfaceQueue};

/// Progress of the search concern for one session.
///
/// Moves forward only: `Idle -> Searching -> Populated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
    Populated,
}

/// Turns search results into places and annotations, and enriches places
/// with details on demand.
///
/// The coordinator is the only writer of the place list. Network calls run on
/// spawned tasks holding a weak reference, so a response that arrives after
/// the coordinator is dropped is discarded.
pub struct AnnotationCoordinator {
    session_id: Uuid,
    client: Arc<dyn PlacesClient>,
    surfaces: SurfaceQueue,
    places: RwLock<Vec<PlaceRef>>,
    state: watch::Sender<SessionState>,
}

impl AnnotationCoordinator {
    pub fn new(session_id: Uuid, client: Arc<dyn PlacesClient>, surfaces: SurfaceQueue) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            session_id,
            client,
            surfaces,
            places: RwLock::new(Vec::new()),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the places discovered so far, in response order
    pub fn places(&self) -> Vec<PlaceRef> {
        self.places.read().clone()
    }

    /// Start the session's single search. Returns `None` if a search has
    /// already been started.
    pub fn begin_search(self: &Arc<Self>, center: GeoPoint, radius_m: u32) -> Option<JoinHandle<()>> {
        let started = self.state.send_if_modified(|state| {
            if *state == SessionState::Idle {
                *state = SessionState::Searching;
                true
            } else {
                false
            }
        });

        if !started {
            debug!(session = %self.session_id, "Search already started, not searching again");
            return None;
        }

        info!(session = %self.session_id, "Loading places around {}", center);

        let client = Arc::clone(&self.client);
        let coordinator = Arc::downgrade(self);

        Some(tokio::spawn(async move {
            let result = client.search(center, radius_m).await;
            match coordinator.upgrade() {
                Some(coordinator) => coordinator.on_search_complete(result),
                None => debug!("Session closed before search completed, dropping response"),
            }
        }))
    }

    fn on_search_complete(&self, result: Result<SearchResponse, NetworkError>) {
        match result {
            Ok(response) => {
                self.on_search_result(response);
            }
            Err(e) => warn!(session = %self.session_id, "Place search failed: {}", e),
        }
    }

    /// Append one place per well-formed record and emit its annotation to the
    /// map. Malformed records are skipped. Returns the number of places added.
    ///
    /// Only a result for the in-flight search is accepted: while `Idle` or
    /// once `Populated`, the response is dropped and nothing changes.
    pub(crate) fn on_search_result(&self, response: SearchResponse) -> usize {
        let mut places = self.places.write();

        let state = self.state();
        if state != SessionState::Searching {
            debug!(
                session = %self.session_id,
                "Ignoring search result of {} records while {:?}",
                response.len(),
                state
            );
            return 0;
        }

        let mut added = 0;

        for (i, record) in response.results.iter().enumerate() {
            let place = match Place::from_record(record) {
                Ok(place) => Arc::new(place),
                Err(e) => {
                    warn!(session = %self.session_id, "Skipping place record {}: {}", i, e);
                    continue;
                }
            };

            let annotation = PlaceAnnotation::from_place(&place);
            places.push(place);
            // Dispatched while still holding the write lock, so map order
            // always matches list order.
            self.surfaces.add_annotation(annotation);
            added += 1;
        }

        // Published before releasing the lock so a second result sees `Populated`
        self.state.send_replace(SessionState::Populated);
        drop(places);

        info!(
            session = %self.session_id,
            "Loaded {} places ({} records skipped)",
            added,
            response.len() - added
        );
        added
    }

    /// Hand the AR surface a snapshot of the current places. Places found
    /// later only appear if this is called again.
    pub fn present_ar(&self, config: ArConfig, delegate: ArDelegate) -> usize {
        let snapshot = self.places();
        let count = snapshot.len();

        debug!(
            session = %self.session_id,
            "Presenting AR view with {} places (max visible {}, smoothing {})",
            count, config.max_visible_annotations, config.heading_smoothing_factor
        );

        self.surfaces.present_ar(snapshot, config, delegate);
        count
    }

    /// Look up details for `place`, merge them into the same place and
    /// present its info. A failed lookup is logged and shows nothing.
    pub fn on_annotation_touched(self: &Arc<Self>, place: PlaceRef) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let coordinator = Arc::downgrade(self);

        tokio::spawn(async move {
            let result = client.fetch_detail(place.reference()).await;
            match coordinator.upgrade() {
                Some(coordinator) => coordinator.on_detail_complete(&place, result),
                None => debug!(
                    "Session closed before detail for {} arrived, dropping response",
                    place.reference()
                ),
            }
        })
    }

    fn on_detail_complete(&self, place: &Place, result: Result<DetailResponse, NetworkError>) {
        match result {
            Ok(detail) => {
                place.apply_detail(detail.into());
                self.surfaces
                    .present_info(place.place_name(), &place.info_text());
            }
            Err(e) => warn!(
                session = %self.session_id,
                "Detail lookup for {} failed: {}",
                place.reference(),
                e
            ),
        }
    }
}
