//! Background position capture.
//!
//! A timer-driven task that fetches the tracked satellite's current
//! position from the remote API and stores it as a new location sample.
//! Capture failures are logged and the loop keeps ticking; a dead tick must
//! never take the poller down.

pub mod client;

pub use client::{PositionClient, PositionReading};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::db::services as db_services;
use crate::db::DocumentRepository;

/// Timer-driven position capture task.
pub struct PositionPoller {
    repository: Arc<dyn DocumentRepository>,
    client: PositionClient,
    sat_id: i64,
    poll_interval: Duration,
}

impl PositionPoller {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        client: PositionClient,
        sat_id: i64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            repository,
            client,
            sat_id,
            poll_interval,
        }
    }

    /// Start the capture loop as a background task.
    ///
    /// The first capture runs immediately; subsequent captures follow at
    /// the configured interval.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        info!(
            "Starting position poller (satellite {}, interval {:?})",
            self.sat_id, self.poll_interval
        );

        tokio::spawn(async move {
            let mut ticker = interval(self.poll_interval);

            loop {
                ticker.tick().await;

                match self.capture_once().await {
                    Ok(true) => {}
                    Ok(false) => {
                        warn!(
                            "Satellite {} not found in store, skipping capture",
                            self.sat_id
                        );
                    }
                    Err(e) => {
                        error!("Position capture failed: {:#}", e);
                    }
                }
            }
        })
    }

    /// Run a single capture.
    ///
    /// # Returns
    /// * `Ok(true)` - A sample was stored
    /// * `Ok(false)` - The tracked satellite is not in the store yet
    /// * `Err` - The fetch or the insert failed
    pub async fn capture_once(&self) -> Result<bool> {
        let satellite =
            match db_services::find_satellite(self.repository.as_ref(), self.sat_id).await? {
                Some(satellite) => satellite,
                None => return Ok(false),
            };

        let units = satellite
            .get("units")
            .and_then(Value::as_str)
            .unwrap_or("kilometers")
            .to_string();

        let reading = self.client.fetch_position(self.sat_id, &units).await?;
        let location = reading.into_location();
        db_services::insert_location(self.repository.as_ref(), &location).await?;

        debug!(
            "Captured position for satellite {} at timestamp {}",
            self.sat_id, location.timestamp
        );
        Ok(true)
    }
}
