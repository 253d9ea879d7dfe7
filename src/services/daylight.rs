//! Daylight window extraction service.
//!
//! Converts an ordered stream of visibility-tagged position samples into the
//! contiguous time windows during which the satellite was in direct
//! sunlight. This is a pure, single-pass computation: it performs no I/O,
//! keeps no state between calls, and either returns the complete window
//! list or fails on the first malformed sample.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::db::Document;

/// Visibility tag for a sample taken in direct sunlight.
pub const VISIBILITY_DAYLIGHT: &str = "daylight";

/// Visibility tag for a sample taken in the Earth's shadow.
pub const VISIBILITY_ECLIPSED: &str = "eclipsed";

/// A maximal contiguous interval during which the satellite was reported in
/// direct sunlight. Serializes both bounds as ISO-8601 UTC strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaylightWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Errors raised while extracting daylight windows.
///
/// All of these are input-contract violations. Any of them aborts the whole
/// extraction; no partial window list is ever returned. Messages embed the
/// offending sample so the failure can be traced to one stored document.
#[derive(Debug, Error)]
pub enum DaylightError {
    /// A sample lacks a required key.
    #[error("missing key `{key}` while processing sample {sample}")]
    MissingField { key: &'static str, sample: String },

    /// `timestamp` is present but not a number.
    #[error("expected a numeric `timestamp`, got {found} while processing sample {sample}")]
    InvalidType { found: String, sample: String },

    /// `timestamp` is numeric but outside the representable date-time range.
    #[error("timestamp {seconds} is outside the representable date-time range while processing sample {sample}")]
    OutOfRange { seconds: f64, sample: String },

    /// `timestamp` magnitude is too large to process at all.
    #[error("timestamp {seconds} overflows the supported time scale while processing sample {sample}")]
    Overflow { seconds: f64, sample: String },
}

fn sample_json(sample: &Document) -> String {
    Value::Object(sample.clone()).to_string()
}

/// Extract daylight windows from position samples ordered by ascending
/// timestamp.
///
/// A window opens at the first `daylight` sample while no window is open
/// and closes at the first subsequent `eclipsed` sample. Redundant
/// transitions are consumed without effect: further `daylight` samples do
/// not move an open window's start, and `eclipsed` samples without an open
/// window do nothing. Visibility values other than the two known tags are
/// likewise ignored. If the input ends while a window is open, the window
/// is closed with the timestamp of the final sample, whatever its
/// visibility.
///
/// The caller is responsible for the ordering; nothing is re-sorted here,
/// so unsorted input produces windows whose bounds reflect the input order.
///
/// # Arguments
/// * `samples` - Sample documents, each exposing at least `visibility`
///   (string) and `timestamp` (epoch seconds). Extra fields are ignored.
///
/// # Returns
/// * `Ok(Vec<DaylightWindow>)` - Windows in the order they were closed
/// * `Err(DaylightError)` - On the first malformed sample
pub fn extract_daylight_windows(
    samples: &[Document],
) -> Result<Vec<DaylightWindow>, DaylightError> {
    let mut windows = Vec::new();
    let mut open_start: Option<DateTime<Utc>> = None;

    for sample in samples {
        let visibility = sample
            .get("visibility")
            .ok_or_else(|| DaylightError::MissingField {
                key: "visibility",
                sample: sample_json(sample),
            })?;

        match (visibility.as_str(), open_start) {
            (Some(VISIBILITY_DAYLIGHT), None) => {
                open_start = Some(sample_timestamp(sample)?);
            }
            (Some(VISIBILITY_ECLIPSED), Some(start)) => {
                windows.push(DaylightWindow {
                    start,
                    end: sample_timestamp(sample)?,
                });
                open_start = None;
            }
            // Redundant transitions and unknown visibility tags are
            // consumed without effect; the timestamp is not even read.
            _ => {}
        }
    }

    if let (Some(start), Some(last)) = (open_start, samples.last()) {
        windows.push(DaylightWindow {
            start,
            end: sample_timestamp(last)?,
        });
    }

    Ok(windows)
}

/// Read and convert a sample's `timestamp` field.
fn sample_timestamp(sample: &Document) -> Result<DateTime<Utc>, DaylightError> {
    let raw = sample
        .get("timestamp")
        .ok_or_else(|| DaylightError::MissingField {
            key: "timestamp",
            sample: sample_json(sample),
        })?;
    let seconds = raw.as_f64().ok_or_else(|| DaylightError::InvalidType {
        found: raw.to_string(),
        sample: sample_json(sample),
    })?;
    epoch_to_datetime(seconds, sample)
}

/// Convert epoch seconds to a UTC date-time.
///
/// Magnitudes at or beyond the `i64` seconds range are overflow errors;
/// values that fit `i64` but are rejected by chrono are range errors.
fn epoch_to_datetime(seconds: f64, sample: &Document) -> Result<DateTime<Utc>, DaylightError> {
    if !seconds.is_finite() || seconds >= i64::MAX as f64 || seconds <= i64::MIN as f64 {
        return Err(DaylightError::Overflow {
            seconds,
            sample: sample_json(sample),
        });
    }

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos).ok_or_else(|| DaylightError::OutOfRange {
        seconds,
        sample: sample_json(sample),
    })
}

#[cfg(test)]
#[path = "daylight_tests.rs"]
mod daylight_tests;
