//! Data Transfer Objects for the HTTP API.
//!
//! Response envelopes carry the raw store documents plus result counts;
//! request bodies are the typed schemas from [`crate::models`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Document;
use crate::services::DaylightWindow;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

/// Query parameters for the satellite listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SatelliteListQuery {
    /// Page size (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Case-insensitive name substring filter
    #[serde(default)]
    pub search: Option<String>,
}

/// Query parameters for location listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub page: Option<usize>,
}

/// Satellite list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteListResponse {
    pub status: String,
    /// Number of satellites in this page
    pub results: usize,
    /// Total satellites in the store
    pub total: u64,
    pub satellites: Vec<Document>,
}

/// Single-satellite response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteResponse {
    pub status: String,
    pub satellite: Document,
}

/// Location list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationListResponse {
    pub status: String,
    /// Number of locations in this page
    pub results: usize,
    /// Total locations matching the query
    pub total: u64,
    pub locations: Vec<Document>,
}

/// Single-location response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub status: String,
    pub location: Document,
}

/// Sunlight exposure timeline for the tracked satellite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssSunResponse {
    pub sat_id: i64,
    /// Number of daylight windows found
    pub results: usize,
    pub windows: Vec<DaylightWindow>,
}

/// Last known position of the tracked satellite.
///
/// The optional fields stay `null` until the first sample is captured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssPositionResponse {
    pub sat_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}
