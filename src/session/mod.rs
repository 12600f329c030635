//! One discovery session: location fixes in, annotations out.
//!
//! Every external event (fix, location failure, AR request, annotation touch)
//! is sent through a [`SessionHandle`] and processed by [`Session::run`] in
//! arrival order.

mod coordinator;

use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub use coordinator::{AnnotationCoordinator, SessionState};

use crate::config::Config;
use crate::error::LocationError;
use crate::location::{GateDecision, LocationGate, LocationSource, LocationUpdate};
use crate::models::PlaceRef;
use crate::places::PlacesClient;
use crate::surface::{ArDelegate, SurfaceQueue};

/// Title of the info shown when positioning fails
pub const LOCATION_ERROR_TITLE: &str = "Location unavailable";

#[derive(Debug)]
pub enum SessionEvent {
    Location(LocationUpdate),
    LocationFailed(LocationError),
    PresentAr,
    AnnotationTouched(PlaceRef),
    Shutdown,
}

/// Cloneable entry point for feeding events into a running session
#[derive(Clone)]
pub struct SessionHandle {
    id: Uuid,
    tx: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Receiver<SessionState>,
    coordinator: Weak<AnnotationCoordinator>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns false if the session has ended.
    pub fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn location(&self, update: LocationUpdate) -> bool {
        self.send(SessionEvent::Location(update))
    }

    pub fn location_failed(&self, error: LocationError) -> bool {
        self.send(SessionEvent::LocationFailed(error))
    }

    pub fn present_ar(&self) -> bool {
        self.send(SessionEvent::PresentAr)
    }

    pub fn touch(&self, place: PlaceRef) -> bool {
        self.send(SessionEvent::AnnotationTouched(place))
    }

    pub fn close(&self) -> bool {
        self.send(SessionEvent::Shutdown)
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Wait until the session reaches `target`. Returns false if the session
    /// ended first.
    pub async fn wait_for_state(&self, target: SessionState) -> bool {
        let mut state = self.state.clone();
        state.wait_for(|s| *s == target).await.map(|_| ()).is_ok()
    }

    /// Places discovered so far; empty once the session has ended.
    pub fn places(&self) -> Vec<PlaceRef> {
        self.coordinator
            .upgrade()
            .map(|c| c.places())
            .unwrap_or_default()
    }
}

pub struct Session {
    id: Uuid,
    config: Config,
    gate: LocationGate,
    location: Box<dyn LocationSource>,
    coordinator: Arc<AnnotationCoordinator>,
    surfaces: SurfaceQueue,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    /// Handed to the AR surface so it cannot keep the session alive
    weak_tx: mpsc::WeakUnboundedSender<SessionEvent>,
}

impl Session {
    pub fn new(
        config: Config,
        client: Arc<dyn PlacesClient>,
        location: Box<dyn LocationSource>,
        surfaces: SurfaceQueue,
    ) -> (Self, SessionHandle) {
        let id = Uuid::new_v4();
        let (tx, events) = mpsc::unbounded_channel();
        let coordinator = Arc::new(AnnotationCoordinator::new(id, client, surfaces.clone()));

        let handle = SessionHandle {
            id,
            tx: tx.clone(),
            state: coordinator.subscribe(),
            coordinator: Arc::downgrade(&coordinator),
        };

        let session = Self {
            id,
            config,
            gate: LocationGate::new(),
            location,
            coordinator,
            surfaces,
            events,
            weak_tx: tx.downgrade(),
        };

        (session, handle)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Start location updates and process events until the session is shut
    /// down or every handle has been dropped.
    pub async fn run(mut self) {
        info!(session = %self.id, "Session started");

        self.location.start();
        self.location.request_authorization();

        while let Some(event) = self.events.recv().await {
            if let SessionEvent::Shutdown = event {
                break;
            }
            self.handle_event(event);
        }

        info!(
            session = %self.id,
            "Session ended with {} places",
            self.coordinator.places().len()
        );
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Location(update) => self.on_location(update),
            SessionEvent::LocationFailed(error) => {
                warn!(session = %self.id, "Location error: {}", error);
                self.surfaces
                    .present_info(LOCATION_ERROR_TITLE, &error.to_string());
            }
            SessionEvent::PresentAr => {
                let origin = self.gate.last_accepted().map(|u| u.coordinate);
                let delegate = ArDelegate::new(origin, self.weak_tx.clone());
                self.coordinator.present_ar(self.config.ar, delegate);
            }
            SessionEvent::AnnotationTouched(place) => {
                debug!(session = %self.id, "Annotation touched: {}", place.reference());
                self.coordinator.on_annotation_touched(place);
            }
            SessionEvent::Shutdown => {}
        }
    }

    fn on_location(&mut self, update: LocationUpdate) {
        let decision = self.gate.evaluate(update);

        match decision {
            GateDecision::Ignore => {}
            GateDecision::Center(region) => self.surfaces.set_region(region),
            GateDecision::CenterAndTrigger(region) => {
                self.location.stop();
                self.surfaces.set_region(region);
                self.coordinator
                    .begin_search(region.center, self.config.places.search_radius_m);
            }
        }
    }
}
