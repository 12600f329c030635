use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub places: PlacesConfig,
    #[serde(default)]
    pub ar: ArConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlacesConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_radius")]
    pub search_radius_m: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AR overlay settings passed to the AR surface at presentation
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ArConfig {
    #[serde(default = "default_max_visible")]
    pub max_visible_annotations: usize,
    #[serde(default = "default_heading_smoothing")]
    pub heading_smoothing_factor: f64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_search_radius() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    30
}

fn default_max_visible() -> usize {
    30
}

fn default_heading_smoothing() -> f64 {
    0.05
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            search_radius_m: default_search_radius(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            max_visible_annotations: default_max_visible(),
            heading_smoothing_factor: default_heading_smoothing(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
