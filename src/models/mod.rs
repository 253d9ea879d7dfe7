//! Typed schemas for the records the store holds.
//!
//! Documents in the store are schemaless JSON objects; these types validate
//! payloads at the HTTP boundary and give the poller a concrete shape to
//! produce. `timestamp` values are epoch seconds (fractional allowed),
//! which is what the upstream position API reports and what the
//! daylight-window extractor consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::Document;

fn default_units() -> String {
    "kilometers".to_string()
}

/// A tracked satellite. `sat_id` is the NORAD catalog number and is unique
/// within the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub sat_id: i64,
    pub name: String,
    #[serde(default = "default_units")]
    pub units: String,
}

/// One position sample for a satellite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub sat_id: i64,
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

fn to_document<T: Serialize>(value: &T) -> serde_json::Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

impl Satellite {
    /// Render as a store document (without `_id`).
    pub fn to_document(&self) -> serde_json::Result<Document> {
        to_document(self)
    }
}

impl Location {
    /// Render as a store document (without `_id`).
    pub fn to_document(&self) -> serde_json::Result<Document> {
        to_document(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_satellite_units_default() {
        let satellite: Satellite =
            serde_json::from_value(json!({"sat_id": 25544, "name": "ISS (ZARYA)"})).unwrap();
        assert_eq!(satellite.units, "kilometers");
    }

    #[test]
    fn test_satellite_to_document() {
        let satellite = Satellite {
            sat_id: 25544,
            name: "ISS (ZARYA)".to_string(),
            units: "miles".to_string(),
        };
        let document = satellite.to_document().unwrap();
        assert_eq!(document.get("sat_id"), Some(&json!(25544)));
        assert_eq!(document.get("units"), Some(&json!("miles")));
        assert!(!document.contains_key("_id"));
    }

    #[test]
    fn test_location_round_trip() {
        let raw = json!({
            "sat_id": 25544,
            "latitude": 50.11,
            "longitude": 118.07,
            "altitude": 420.1,
            "velocity": 27571.2,
            "visibility": "daylight",
            "footprint": 4509.2,
            "timestamp": 1733011200.5,
            "daynum": 2460645.5,
            "solar_lat": -21.7,
            "solar_lon": 104.9,
            "units": "kilometers",
        });
        let location: Location = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(location.timestamp, 1733011200.5);
        assert_eq!(location.visibility, "daylight");

        let document = location.to_document().unwrap();
        assert_eq!(Value::Object(document), raw);
    }

    #[test]
    fn test_location_rejects_missing_fields() {
        let result: Result<Location, _> =
            serde_json::from_value(json!({"sat_id": 25544, "latitude": 1.0}));
        assert!(result.is_err());
    }
}
