//! Serialized update context for the rendering surfaces.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{ArConfig, ArDelegate, ArSurface, InfoPresenter, MapSurface};
use crate::models::{MapRegion, PlaceAnnotation, PlaceRef};

/// One surface mutation
#[derive(Debug)]
pub enum SurfaceCommand {
    SetRegion(MapRegion),
    AddAnnotation(PlaceAnnotation),
    PresentAr {
        places: Vec<PlaceRef>,
        config: ArConfig,
        delegate: ArDelegate,
    },
    PresentInfo {
        title: String,
        message: String,
    },
}

/// The surfaces owned by the queue task
pub struct Surfaces {
    pub map: Box<dyn MapSurface>,
    pub ar: Box<dyn ArSurface>,
    pub presenter: Box<dyn InfoPresenter>,
}

impl Surfaces {
    fn apply(&mut self, command: SurfaceCommand) {
        match command {
            SurfaceCommand::SetRegion(region) => self.map.set_region(region),
            SurfaceCommand::AddAnnotation(annotation) => self.map.add_annotation(annotation),
            SurfaceCommand::PresentAr {
                places,
                config,
                delegate,
            } => {
                self.ar.configure(config);
                self.ar.set_annotations(places);
                self.ar.present(delegate);
            }
            SurfaceCommand::PresentInfo { title, message } => {
                self.presenter.present_info(&title, &message)
            }
        }
    }
}

/// Sender side of the surface queue.
///
/// Commands are applied one at a time, in send order, on the queue task.
/// Sending never blocks, so it is safe from any task or thread.
#[derive(Clone)]
pub struct SurfaceQueue {
    tx: mpsc::UnboundedSender<SurfaceCommand>,
}

impl SurfaceQueue {
    /// Move `surfaces` onto a new task. The task exits once every
    /// `SurfaceQueue` clone has been dropped and the backlog is drained.
    pub fn spawn(mut surfaces: Surfaces) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SurfaceCommand>();

        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                surfaces.apply(command);
            }
            debug!("Surface queue drained");
        });

        (Self { tx }, handle)
    }

    pub fn dispatch(&self, command: SurfaceCommand) {
        if self.tx.send(command).is_err() {
            debug!("Surface queue closed, dropping update");
        }
    }

    pub fn set_region(&self, region: MapRegion) {
        self.dispatch(SurfaceCommand::SetRegion(region));
    }

    pub fn add_annotation(&self, annotation: PlaceAnnotation) {
        self.dispatch(SurfaceCommand::AddAnnotation(annotation));
    }

    pub fn present_ar(&self, places: Vec<PlaceRef>, config: ArConfig, delegate: ArDelegate) {
        self.dispatch(SurfaceCommand::PresentAr {
            places,
            config,
            delegate,
        });
    }

    pub fn present_info(&self, title: &str, message: &str) {
        self.dispatch(SurfaceCommand::PresentInfo {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
