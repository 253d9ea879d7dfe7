use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;

use super::*;
use crate::config::TrackingConfig;
use crate::db::{LocalRepository, RepositoryError};

const T0: f64 = 1_733_011_200.0; // 2024-12-01T00:00:00Z

fn app_state() -> AppState {
    AppState::new(
        Arc::new(LocalRepository::new()),
        Arc::new(TrackingConfig::default()),
    )
}

fn satellite(sat_id: i64, name: &str) -> Satellite {
    Satellite {
        sat_id,
        name: name.to_string(),
        units: "kilometers".to_string(),
    }
}

fn location(sat_id: i64, timestamp: f64, visibility: &str) -> Location {
    Location {
        sat_id,
        latitude: 50.11,
        longitude: 118.07,
        altitude: 420.1,
        velocity: 27571.2,
        visibility: visibility.to_string(),
        footprint: 4509.2,
        timestamp,
        daynum: 2460645.5,
        solar_lat: -21.7,
        solar_lon: 104.9,
        units: "kilometers".to_string(),
    }
}

async fn seed_iss(state: &AppState) {
    state
        .repository
        .insert(
            SATELLITES,
            satellite(25544, "ISS (ZARYA)").to_document().unwrap(),
        )
        .await
        .unwrap();
}

async fn seed_location(state: &AppState, timestamp: f64, visibility: &str) {
    db_services::insert_location(state.repository.as_ref(), &location(25544, timestamp, visibility))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health_check_reports_connected_store() {
    let state = app_state();
    let Json(response) = health_check(State(state)).await.unwrap();
    assert_eq!(response.status, "ok");
    assert_eq!(response.database, "connected");
}

#[tokio::test]
async fn test_iss_sun_requires_tracked_satellite() {
    let state = app_state();
    let err = iss_sun(State(state)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_iss_sun_empty_history() {
    let state = app_state();
    seed_iss(&state).await;

    let Json(response) = iss_sun(State(state)).await.unwrap();
    assert_eq!(response.sat_id, 25544);
    assert_eq!(response.results, 0);
    assert!(response.windows.is_empty());
}

#[tokio::test]
async fn test_iss_sun_extracts_windows_from_sorted_history() {
    let state = app_state();
    seed_iss(&state).await;

    // Inserted out of order: the handler asks the store for ascending
    // timestamps before running the extractor.
    seed_location(&state, T0 + 90.0, "eclipsed").await;
    seed_location(&state, T0, "daylight").await;
    seed_location(&state, T0 + 60.0, "daylight").await;
    seed_location(&state, T0 + 30.0, "eclipsed").await;

    let Json(response) = iss_sun(State(state)).await.unwrap();
    assert_eq!(response.results, 2);
    assert_eq!(response.windows.len(), 2);
    assert!(response.windows[0].end <= response.windows[1].start);
}

#[tokio::test]
async fn test_iss_sun_malformed_sample_is_server_error() {
    let state = app_state();
    seed_iss(&state).await;

    let malformed = json!({
        "sat_id": 25544,
        "visibility": "daylight",
        "timestamp": "not-a-number",
    })
    .as_object()
    .cloned()
    .unwrap();
    state
        .repository
        .insert(LOCATIONS, malformed)
        .await
        .unwrap();

    let err = iss_sun(State(state)).await.unwrap_err();
    match err {
        AppError::Internal(message) => {
            // The internal error kind stays in the logs, not the response.
            assert!(!message.contains("not-a-number"));
        }
        other => panic!("expected internal error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_iss_position_empty_then_latest() {
    let state = app_state();
    seed_iss(&state).await;

    let Json(empty) = iss_position(State(state.clone())).await.unwrap();
    assert_eq!(empty.sat_id, 25544);
    assert!(empty.latitude.is_none());
    assert!(empty.timestamp.is_none());

    seed_location(&state, T0, "daylight").await;
    seed_location(&state, T0 + 30.0, "eclipsed").await;

    let Json(latest) = iss_position(State(state)).await.unwrap();
    assert_eq!(latest.latitude, Some(50.11));
    assert_eq!(latest.longitude, Some(118.07));
    assert_eq!(
        latest.timestamp.map(|t| t.timestamp()),
        Some((T0 + 30.0) as i64)
    );
}

#[tokio::test]
async fn test_create_get_delete_satellite() {
    let state = app_state();

    let (status, Json(created)) = create_satellite(
        State(state.clone()),
        Json(satellite(25544, "ISS (ZARYA)")),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let id = created
        .satellite
        .get("_id")
        .and_then(Value::as_str)
        .unwrap()
        .to_string();

    let Json(fetched) = get_satellite(State(state.clone()), Path(id.clone()))
        .await
        .unwrap();
    assert_eq!(fetched.satellite.get("sat_id"), Some(&json!(25544)));

    let Json(deleted) = delete_satellite(State(state.clone()), Path(id.clone()))
        .await
        .unwrap();
    assert_eq!(deleted.status, "success");

    let err = get_satellite(State(state), Path(id)).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Repository(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_create_satellite_rejects_duplicate_sat_id() {
    let state = app_state();
    seed_iss(&state).await;

    let err = create_satellite(State(state), Json(satellite(25544, "duplicate")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Repository(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_list_satellites_search_and_pagination() {
    let state = app_state();
    seed_iss(&state).await;
    state
        .repository
        .insert(
            SATELLITES,
            satellite(20580, "Hubble Space Telescope")
                .to_document()
                .unwrap(),
        )
        .await
        .unwrap();

    let Json(all) = list_satellites(State(state.clone()), Query(SatelliteListQuery::default()))
        .await
        .unwrap();
    assert_eq!(all.results, 2);
    assert_eq!(all.total, 2);

    let Json(filtered) = list_satellites(
        State(state.clone()),
        Query(SatelliteListQuery {
            search: Some("hubble".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(filtered.results, 1);
    assert_eq!(
        filtered.satellites[0].get("sat_id"),
        Some(&json!(20580))
    );

    let Json(paged) = list_satellites(
        State(state),
        Query(SatelliteListQuery {
            limit: Some(1),
            page: Some(2),
            search: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(paged.results, 1);
    assert_eq!(paged.total, 2);
}

#[tokio::test]
async fn test_create_location_requires_existing_satellite() {
    let state = app_state();
    let err = create_location(State(state), Json(location(25544, T0, "daylight")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Repository(RepositoryError::ValidationError { .. })
    ));
}

#[tokio::test]
async fn test_locations_by_satellite_newest_first() {
    let state = app_state();
    seed_iss(&state).await;
    for offset in [0.0, 30.0, 60.0, 90.0] {
        seed_location(&state, T0 + offset, "daylight").await;
    }

    let Json(page) = locations_by_satellite(
        State(state),
        Path(25544),
        Query(LocationListQuery {
            limit: Some(2),
            page: Some(1),
        }),
    )
    .await
    .unwrap();

    assert_eq!(page.results, 2);
    assert_eq!(page.total, 4);
    let timestamps: Vec<f64> = page
        .locations
        .iter()
        .map(|row| row.get("timestamp").and_then(Value::as_f64).unwrap())
        .collect();
    assert_eq!(timestamps, vec![T0 + 90.0, T0 + 60.0]);
}

#[tokio::test]
async fn test_delete_satellite_cascades_history() {
    let state = app_state();
    seed_iss(&state).await;
    seed_location(&state, T0, "daylight").await;
    seed_location(&state, T0 + 30.0, "eclipsed").await;

    let Json(listed) = list_satellites(State(state.clone()), Query(SatelliteListQuery::default()))
        .await
        .unwrap();
    let id = listed.satellites[0]
        .get("_id")
        .and_then(Value::as_str)
        .unwrap()
        .to_string();

    delete_satellite(State(state.clone()), Path(id)).await.unwrap();

    let Json(locations) = list_locations(State(state), Query(LocationListQuery::default()))
        .await
        .unwrap();
    assert_eq!(locations.total, 0);
}
