//! Client for the satellite position API (wheretheiss.at-compatible).

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::Location;

/// One position reading as the remote API reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionReading {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub visibility: String,
    pub footprint: f64,
    pub timestamp: f64,
    pub daynum: f64,
    pub solar_lat: f64,
    pub solar_lon: f64,
    pub units: String,
}

impl PositionReading {
    /// Convert into a storable location sample.
    ///
    /// The API's `id` becomes `sat_id`; the display `name` is dropped since
    /// the satellite record already carries it.
    pub fn into_location(self) -> Location {
        Location {
            sat_id: self.id,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            velocity: self.velocity,
            visibility: self.visibility,
            footprint: self.footprint,
            timestamp: self.timestamp,
            daynum: self.daynum,
            solar_lat: self.solar_lat,
            solar_lon: self.solar_lon,
            units: self.units,
        }
    }
}

/// HTTP client for the position API.
pub struct PositionClient {
    client: reqwest::Client,
    base_url: String,
}

impl PositionClient {
    /// Build a client with a request timeout.
    ///
    /// `base_url` is the satellite resource prefix, e.g.
    /// `https://api.wheretheiss.at/v1/satellites/`.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the current position of one satellite.
    pub async fn fetch_position(&self, sat_id: i64, units: &str) -> Result<PositionReading> {
        let url = format!("{}{}?units={}", self.base_url, sat_id, units);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request position for satellite {}", sat_id))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP error {} fetching position for satellite {}",
                response.status(),
                sat_id
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse position response for satellite {}", sat_id))
    }
}
