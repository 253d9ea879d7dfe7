//! Application configuration.
//!
//! Settings load from an optional `satwatch.toml` file; every field has a
//! default, so a missing file yields a fully working configuration. The
//! server binary applies `HOST` / `PORT` environment overrides on top. The
//! loaded config is passed explicitly to its consumers; there is no global
//! configuration object.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Satellite tracking settings: which satellite to follow and how to reach
/// the position API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// NORAD id of the tracked satellite (the ISS by default).
    #[serde(default = "default_iss_sat_id")]
    pub iss_sat_id: i64,
    /// Satellite resource prefix of the position API.
    #[serde(default = "default_position_api_url")]
    pub position_api_url: String,
    /// Units requested from the API and used when seeding the satellite.
    #[serde(default = "default_units")]
    pub units: String,
    /// Seconds between position captures.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Request timeout for the position API.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Whether the background poller starts at all.
    #[serde(default = "default_poller_enabled")]
    pub poller_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_iss_sat_id() -> i64 {
    25544
}

fn default_position_api_url() -> String {
    "https://api.wheretheiss.at/v1/satellites/".to_string()
}

fn default_units() -> String {
    "kilometers".to_string()
}

fn default_poll_interval_secs() -> u64 {
    20
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_poller_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            iss_sat_id: default_iss_sat_id(),
            position_api_url: default_position_api_url(),
            units: default_units(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            poller_enabled: default_poller_enabled(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.as_ref().display().to_string(),
            source,
        })
    }

    /// Load configuration from the default locations, falling back to the
    /// built-in defaults when no file exists.
    ///
    /// Searches for `satwatch.toml` in the current directory, `config/`,
    /// and the parent directory. A file that exists but fails to parse is
    /// an error, not a silent fallback.
    pub fn load() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("satwatch.toml"),
            PathBuf::from("config/satwatch.toml"),
            PathBuf::from("../satwatch.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
