//! Command line driver for a discovery session.
//!
//! Feeds scripted location fixes into a session backed by the Google Places
//! API and prints annotations, the AR overlay and info views to the console.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nearby::location::LocationUpdate;
use nearby::places::GooglePlacesClient;
use nearby::surface::SurfaceQueue;
use nearby::{Config, GeoPoint, Session, SessionState};

mod console;

#[derive(Parser, Debug)]
#[command(name = "nearby")]
#[command(about = "Discover points of interest around a location")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Places API key (overrides the config file)
    #[arg(long, env = "PLACES_API_KEY")]
    api_key: Option<String>,

    /// Location fix "lat,lon,accuracy_m"; repeat for a sequence
    #[arg(long = "fix", required = true, allow_hyphen_values = true, value_parser = parse_fix)]
    fixes: Vec<LocationUpdate>,

    /// Search radius in metres (overrides the config file)
    #[arg(long)]
    radius: Option<u32>,

    /// Present the AR overlay once places are loaded
    #[arg(long)]
    ar: bool,

    /// Touch the place at this index to load its details
    #[arg(long)]
    touch: Option<usize>,

    /// Seconds to wait for each network response
    #[arg(long, default_value = "30")]
    wait_secs: u64,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(key) = args.api_key.clone() {
        config.places.api_key = key;
    }
    if let Some(radius) = args.radius {
        config.places.search_radius_m = radius;
    }
    if config.places.api_key.is_empty() {
        anyhow::bail!("No API key: pass --api-key, set PLACES_API_KEY or add it to the config");
    }

    let client = Arc::new(GooglePlacesClient::new(&config.places)?);
    let (surfaces, mut shown) = console::surfaces();
    let (queue, queue_task) = SurfaceQueue::spawn(surfaces);

    let listening = Arc::new(AtomicBool::new(false));
    let (session, handle) = Session::new(
        config,
        client,
        Box::new(console::ScriptedLocation::new(listening.clone())),
        queue,
    );
    info!("Session {}", handle.id());
    let session_task = tokio::spawn(session.run());

    let wait = Duration::from_secs(args.wait_secs);

    for fix in args.fixes {
        // Let the session act on the previous fix before deciding to send more
        tokio::task::yield_now().await;
        if session_task.is_finished() {
            break;
        }
        if handle.state() != SessionState::Idle && !listening.load(Ordering::SeqCst) {
            info!("Location updates stopped, skipping remaining fixes");
            break;
        }
        handle.location(fix);
    }

    match tokio::time::timeout(wait, handle.wait_for_state(SessionState::Populated)).await {
        Ok(true) => info!("Loaded {} places", handle.places().len()),
        _ => warn!("No places loaded (no accurate fix, or the search failed)"),
    }

    if args.ar {
        handle.present_ar();
    }

    if let Some(index) = args.touch {
        match handle.places().get(index) {
            Some(place) => {
                handle.touch(place.clone());
                if tokio::time::timeout(wait, shown.recv()).await.is_err() {
                    warn!("No details for {}", place.place_name());
                }
            }
            None => warn!("No place at index {}", index),
        }
    }

    handle.close();
    drop(handle);
    session_task.await?;
    let _ = tokio::time::timeout(Duration::from_secs(1), queue_task).await;

    Ok(())
}

/// Parse "lat,lon,accuracy_m"
fn parse_fix(s: &str) -> Result<LocationUpdate, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid fix '{}': {}", s, e))?;

    match parts.as_slice() {
        [lat, lon, accuracy] => {
            let coordinate = GeoPoint::checked(*lat, *lon).map_err(|e| e.to_string())?;
            Ok(LocationUpdate::new(coordinate, *accuracy))
        }
        _ => Err(format!("expected 'lat,lon,accuracy_m', got '{}'", s)),
    }
}
