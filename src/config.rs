//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Base URL of the telemetry store serving raw position streams
    pub telemetry_url: String,
    /// Base URL of the reverse geocoder; addresses stay unresolved when unset
    pub geocoder_url: Option<String>,
    /// Per-request timeout for geocoder lookups (milliseconds)
    pub geocode_timeout_ms: u64,
    /// Default `minStopDuration` in seconds when the request omits it
    pub default_min_stop_secs: u32,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            telemetry_url: "http://localhost:9090".to_string(),
            geocoder_url: None,
            geocode_timeout_ms: 2000,
            default_min_stop_secs: 300,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            telemetry_url: env::var("TELEMETRY_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("TELEMETRY_URL"))?,
            geocoder_url: env::var("GEOCODER_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string()),
            geocode_timeout_ms: env::var("GEOCODE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            default_min_stop_secs: env::var("DEFAULT_MIN_STOP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(300),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
