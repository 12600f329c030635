//! Test doubles for the external collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::config::ArConfig;
use crate::error::NetworkError;
use crate::location::LocationSource;
use crate::models::{GeoPoint, MapRegion, PlaceAnnotation, PlaceRef};
use crate::places::{DetailResponse, PlacesClient, SearchResponse};
use crate::surface::{ArDelegate, ArSurface, InfoPresenter, MapSurface, Surfaces};

pub(crate) fn record(lat: f64, lng: f64, reference: &str, name: &str, vicinity: &str) -> Value {
    json!({
        "geometry": { "location": { "lat": lat, "lng": lng } },
        "reference": reference,
        "name": name,
        "vicinity": vicinity
    })
}

/// Scripted provider. A `None` body answers with HTTP 503.
#[derive(Default)]
pub(crate) struct FakePlacesClient {
    search_body: Mutex<Option<Value>>,
    detail_bodies: Mutex<VecDeque<Option<Value>>>,
    hold_search: Option<Arc<Notify>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub searched_at: Mutex<Vec<(GeoPoint, u32)>>,
}

impl FakePlacesClient {
    pub fn with_results(results: Vec<Value>) -> Self {
        Self {
            search_body: Mutex::new(Some(json!({ "status": "OK", "results": results }))),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Block `search` until the returned notify is signalled.
    pub fn held(mut self) -> (Self, Arc<Notify>) {
        let notify = Arc::new(Notify::new());
        self.hold_search = Some(notify.clone());
        (self, notify)
    }

    pub fn push_detail(&self, body: Option<Value>) {
        self.detail_bodies.lock().push_back(body);
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesClient for FakePlacesClient {
    async fn search(
        &self,
        center: GeoPoint,
        radius_m: u32,
    ) -> Result<SearchResponse, NetworkError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searched_at.lock().push((center, radius_m));

        if let Some(ref notify) = self.hold_search {
            notify.notified().await;
        }

        let body = self.search_body.lock().clone();
        match body {
            Some(body) => SearchResponse::from_json(body),
            None => Err(NetworkError::Status(503)),
        }
    }

    async fn fetch_detail(&self, _reference: &str) -> Result<DetailResponse, NetworkError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        let body = self.detail_bodies.lock().pop_front().flatten();
        match body {
            Some(body) => DetailResponse::from_json(body),
            None => Err(NetworkError::Status(503)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Region(MapRegion),
    Annotation(PlaceAnnotation),
    ArPresented {
        references: Vec<String>,
        config: ArConfig,
    },
    Info {
        title: String,
        message: String,
    },
}

/// Surfaces that append every call to a shared log
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    log: Arc<Mutex<Vec<Recorded>>>,
    ar_places: Arc<Mutex<Vec<PlaceRef>>>,
    ar_config: Arc<Mutex<Option<ArConfig>>>,
    ar_delegate: Arc<Mutex<Option<ArDelegate>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surfaces(&self) -> Surfaces {
        Surfaces {
            map: Box::new(self.clone()),
            ar: Box::new(self.clone()),
            presenter: Box::new(self.clone()),
        }
    }

    pub fn entries(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    pub fn annotations(&self) -> Vec<PlaceAnnotation> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Annotation(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn regions(&self) -> Vec<MapRegion> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Region(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Info { title, message } => Some((title, message)),
                _ => None,
            })
            .collect()
    }

    pub fn ar_places(&self) -> Vec<PlaceRef> {
        self.ar_places.lock().clone()
    }

    pub fn ar_delegate(&self) -> Option<ArDelegate> {
        self.ar_delegate.lock().clone()
    }
}

impl MapSurface for Recorder {
    fn set_region(&mut self, region: MapRegion) {
        self.log.lock().push(Recorded::Region(region));
    }

    fn add_annotation(&mut self, annotation: PlaceAnnotation) {
        self.log.lock().push(Recorded::Annotation(annotation));
    }
}

impl ArSurface for Recorder {
    fn configure(&mut self, config: ArConfig) {
        *self.ar_config.lock() = Some(config);
    }

    fn set_annotations(&mut self, places: Vec<PlaceRef>) {
        *self.ar_places.lock() = places;
    }

    fn present(&mut self, delegate: ArDelegate) {
        let references = self
            .ar_places
            .lock()
            .iter()
            .map(|p| p.reference().to_string())
            .collect();
        let config = self.ar_config.lock().unwrap_or_default();
        self.log
            .lock()
            .push(Recorded::ArPresented { references, config });
        *self.ar_delegate.lock() = Some(delegate);
    }
}

impl InfoPresenter for Recorder {
    fn present_info(&mut self, title: &str, message: &str) {
        self.log.lock().push(Recorded::Info {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

/// Location source counting control calls
#[derive(Clone, Default)]
pub(crate) struct RecordingLocation {
    pub authorizations: Arc<AtomicUsize>,
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
}

impl LocationSource for RecordingLocation {
    fn request_authorization(&mut self) {
        self.authorizations.fetch_add(1, Ordering::SeqCst);
    }

    fn start(&mut self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Poll `condition` until it holds or a second passes.
pub(crate) async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
