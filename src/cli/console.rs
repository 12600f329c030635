//! Console stand-ins for the rendering surfaces and the location subsystem.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use nearby::location::LocationSource;
use nearby::models::{MapRegion, PlaceAnnotation, PlaceRef};
use nearby::surface::{ArConfig, ArDelegate, ArSurface, InfoPresenter, MapSurface, Surfaces};

pub struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn set_region(&mut self, region: MapRegion) {
        info!(
            "Map centered on {} ({}° x {}°)",
            region.center, region.span_lat, region.span_lon
        );
    }

    fn add_annotation(&mut self, annotation: PlaceAnnotation) {
        println!("{} @ {}", annotation.title, annotation.coordinate);
    }
}

#[derive(Default)]
pub struct ConsoleAr {
    config: ArConfig,
    places: Vec<PlaceRef>,
}

impl ArSurface for ConsoleAr {
    fn configure(&mut self, config: ArConfig) {
        self.config = config;
    }

    fn set_annotations(&mut self, places: Vec<PlaceRef>) {
        self.places = places;
    }

    fn present(&mut self, delegate: ArDelegate) {
        println!(
            "AR view: {} places (showing up to {})",
            self.places.len(),
            self.config.max_visible_annotations
        );
        for place in self.places.iter().take(self.config.max_visible_annotations) {
            let view = delegate.provide_view(place);
            println!(
                "  [{}] {}",
                view.distance_label().unwrap_or_else(|| "?".to_string()),
                view.title()
            );
        }
    }
}

/// Prints info views and reports each title on `shown`.
pub struct ConsolePresenter {
    shown: mpsc::UnboundedSender<String>,
}

impl InfoPresenter for ConsolePresenter {
    fn present_info(&mut self, title: &str, message: &str) {
        println!("\n{}\n{}\n", title, message);
        let _ = self.shown.send(title.to_string());
    }
}

pub fn surfaces() -> (Surfaces, mpsc::UnboundedReceiver<String>) {
    let (shown, rx) = mpsc::unbounded_channel();
    let surfaces = Surfaces {
        map: Box::new(ConsoleMap),
        ar: Box::new(ConsoleAr::default()),
        presenter: Box::new(ConsolePresenter { shown }),
    };
    (surfaces, rx)
}

/// Location source fed from command line fixes. `listening` is cleared when
/// the session stops updates.
pub struct ScriptedLocation {
    listening: Arc<AtomicBool>,
}

impl ScriptedLocation {
    pub fn new(listening: Arc<AtomicBool>) -> Self {
        Self { listening }
    }
}

impl LocationSource for ScriptedLocation {
    fn start(&mut self) {
        info!("Location updates started");
        self.listening.store(true, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        info!("Location updates stopped");
        self.listening.store(false, Ordering::SeqCst);
    }
}
