//! Application configuration loaded from environment variables.
//!
//! API keys for the enrichment services are required; everything else has
//! a sensible default.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Key under which the workout collection is persisted.
pub const STORAGE_KEY: &str = "workouts";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Enrichment services ---
    /// LocationIQ API key (reverse geocoding)
    pub locationiq_api_key: String,
    /// LocationIQ API base URL
    pub locationiq_base_url: String,
    /// WeatherAPI key (current conditions)
    pub weather_api_key: String,
    /// WeatherAPI base URL
    pub weather_base_url: String,

    // --- Persistence ---
    /// Root directory for the file-backed key-value store
    pub storage_dir: PathBuf,

    // --- Map behaviour ---
    /// Zoom level used when panning to a selected workout
    pub map_zoom_level: u8,
    /// How long the map must be held down to enter annotation mode
    pub annotation_hold: Duration,
    /// Delay before annotation mode re-enters itself after a clear
    pub annotation_resume: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            locationiq_api_key: "test_locationiq_key".to_string(),
            locationiq_base_url: "https://us1.locationiq.com/v1".to_string(),
            weather_api_key: "test_weather_key".to_string(),
            weather_base_url: "https://api.weatherapi.com/v1".to_string(),
            storage_dir: PathBuf::from("data"),
            map_zoom_level: 13,
            annotation_hold: Duration::from_millis(1500),
            annotation_resume: Duration::from_millis(100),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            locationiq_api_key: env::var("LOCATIONIQ_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LOCATIONIQ_API_KEY"))?,
            locationiq_base_url: env::var("LOCATIONIQ_BASE_URL")
                .unwrap_or(defaults.locationiq_base_url),
            weather_api_key: env::var("WEATHERAPI_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WEATHERAPI_KEY"))?,
            weather_base_url: env::var("WEATHERAPI_BASE_URL").unwrap_or(defaults.weather_base_url),
            storage_dir: env::var("MAPTY_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            map_zoom_level: env::var("MAPTY_MAP_ZOOM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.map_zoom_level),
            annotation_hold: millis_from_env("MAPTY_HOLD_MS").unwrap_or(defaults.annotation_hold),
            annotation_resume: millis_from_env("MAPTY_RESUME_MS")
                .unwrap_or(defaults.annotation_resume),
        })
    }
}

fn millis_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
