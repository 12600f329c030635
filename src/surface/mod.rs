//! Rendering surfaces: the 2D map, the AR overlay and the info presenter.
//!
//! Surfaces are never touched directly by the session; every mutation goes
//! through [`SurfaceQueue`], whose single task owns all of them.

mod queue;

use tokio::sync::mpsc::WeakUnboundedSender;
use tracing::debug;

pub use crate::config::ArConfig;
pub use queue::{SurfaceCommand, SurfaceQueue, Surfaces};

use crate::models::{GeoPoint, MapRegion, PlaceAnnotation, PlaceRef};
use crate::session::SessionEvent;

/// Default AR annotation view frame, in points
pub const ANNOTATION_VIEW_WIDTH: f64 = 150.0;
pub const ANNOTATION_VIEW_HEIGHT: f64 = 50.0;

/// 2D map annotation sink
pub trait MapSurface: Send + 'static {
    fn set_region(&mut self, region: MapRegion);
    fn add_annotation(&mut self, annotation: PlaceAnnotation);
}

/// Camera overlay showing places around the user
pub trait ArSurface: Send + 'static {
    fn configure(&mut self, config: ArConfig);

    /// Replace the annotation source with a snapshot of places.
    fn set_annotations(&mut self, places: Vec<PlaceRef>);

    /// Show the overlay. The surface asks `delegate` for views and reports
    /// touches back through it.
    fn present(&mut self, delegate: ArDelegate);
}

/// Modal info display (title + message)
pub trait InfoPresenter: Send + 'static {
    fn present_info(&mut self, title: &str, message: &str);
}

/// View handed to the AR surface for one place
#[derive(Debug, Clone)]
pub struct AnnotationView {
    pub place: PlaceRef,
    pub width: f64,
    pub height: f64,
    /// Metres from the session origin, when one is known
    pub distance_m: Option<f64>,
}

impl AnnotationView {
    pub fn title(&self) -> &str {
        self.place.place_name()
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance_m.map(|d| format!("{:.0} m", d))
    }
}

/// Data source and touch delegate for the AR surface.
///
/// Holds only a weak link to the session: touches after teardown are dropped.
#[derive(Debug, Clone)]
pub struct ArDelegate {
    origin: Option<GeoPoint>,
    events: WeakUnboundedSender<SessionEvent>,
}

impl ArDelegate {
    pub fn new(origin: Option<GeoPoint>, events: WeakUnboundedSender<SessionEvent>) -> Self {
        Self { origin, events }
    }

    pub fn provide_view(&self, place: &PlaceRef) -> AnnotationView {
        AnnotationView {
            place: PlaceRef::clone(place),
            width: ANNOTATION_VIEW_WIDTH,
            height: ANNOTATION_VIEW_HEIGHT,
            distance_m: self.origin.map(|o| o.distance_to(&place.location())),
        }
    }

    /// Returns false if the session is gone.
    pub fn on_touch(&self, view: &AnnotationView) -> bool {
        let Some(events) = self.events.upgrade() else {
            debug!("Touch on {} after session closed", view.place.reference());
            return false;
        };
        events
            .send(SessionEvent::AnnotationTouched(PlaceRef::clone(&view.place)))
            .is_ok()
    }
}
