//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the store
//! helpers and the service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::DateTime;
use serde_json::Value;

use super::dto::{
    HealthResponse, IssPositionResponse, IssSunResponse, LocationListQuery, LocationListResponse,
    LocationResponse, SatelliteListQuery, SatelliteListResponse, SatelliteResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::schema::{LOCATIONS, SATELLITES};
use crate::db::services as db_services;
use crate::db::FindQuery;
use crate::models::{Location, Satellite};
use crate::services::extract_daylight_windows;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

const DEFAULT_PAGE_SIZE: usize = 10;

fn page_window(limit: Option<usize>, page: Option<usize>) -> (usize, usize) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    (limit, (page - 1) * limit)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Satellite CRUD
// =============================================================================

/// GET /v1/satellites
///
/// Paginated satellite listing with an optional name filter.
pub async fn list_satellites(
    State(state): State<AppState>,
    Query(query): Query<SatelliteListQuery>,
) -> HandlerResult<SatelliteListResponse> {
    let (limit, skip) = page_window(query.limit, query.page);

    let mut find = FindQuery::new().skip(skip).limit(limit);
    if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        find = find.contains("name", search);
    }

    let satellites = state.repository.find(SATELLITES, find).await?;
    let total = state
        .repository
        .count(SATELLITES, FindQuery::new())
        .await?;

    Ok(Json(SatelliteListResponse {
        status: "success".to_string(),
        results: satellites.len(),
        total,
        satellites,
    }))
}

/// POST /v1/satellites
///
/// Create a new satellite record.
pub async fn create_satellite(
    State(state): State<AppState>,
    Json(payload): Json<Satellite>,
) -> Result<(StatusCode, Json<SatelliteResponse>), AppError> {
    let satellite = state
        .repository
        .insert(SATELLITES, payload.to_document()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SatelliteResponse {
            status: "success".to_string(),
            satellite,
        }),
    ))
}

/// GET /v1/satellites/{satellite_id}
///
/// Get a satellite by its document ID.
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
) -> HandlerResult<SatelliteResponse> {
    let satellite = state.repository.get(SATELLITES, &satellite_id).await?;

    Ok(Json(SatelliteResponse {
        status: "success".to_string(),
        satellite,
    }))
}

/// DELETE /v1/satellites/{satellite_id}
///
/// Delete a satellite and, through the store's cascade rule, all of its
/// location samples.
pub async fn delete_satellite(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
) -> HandlerResult<SatelliteResponse> {
    let satellite = state.repository.remove(SATELLITES, &satellite_id).await?;

    Ok(Json(SatelliteResponse {
        status: "success".to_string(),
        satellite,
    }))
}

// =============================================================================
// Location CRUD
// =============================================================================

/// GET /v1/locations
///
/// Paginated location listing.
pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationListQuery>,
) -> HandlerResult<LocationListResponse> {
    let (limit, skip) = page_window(query.limit, query.page);

    let locations = state
        .repository
        .find(LOCATIONS, FindQuery::new().skip(skip).limit(limit))
        .await?;
    let total = state.repository.count(LOCATIONS, FindQuery::new()).await?;

    Ok(Json(LocationListResponse {
        status: "success".to_string(),
        results: locations.len(),
        total,
        locations,
    }))
}

/// POST /v1/locations
///
/// Create a new location sample. The referenced satellite must exist.
pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<Location>,
) -> Result<(StatusCode, Json<LocationResponse>), AppError> {
    let location = db_services::insert_location(state.repository.as_ref(), &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(LocationResponse {
            status: "success".to_string(),
            location,
        }),
    ))
}

/// GET /v1/locations/{location_id}
///
/// Get a location by its document ID.
pub async fn get_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> HandlerResult<LocationResponse> {
    let location = state.repository.get(LOCATIONS, &location_id).await?;

    Ok(Json(LocationResponse {
        status: "success".to_string(),
        location,
    }))
}

/// DELETE /v1/locations/{location_id}
///
/// Delete a single location sample.
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> HandlerResult<LocationResponse> {
    let location = state.repository.remove(LOCATIONS, &location_id).await?;

    Ok(Json(LocationResponse {
        status: "success".to_string(),
        location,
    }))
}

/// GET /v1/locations/by-satellite/{sat_id}
///
/// Latest-first location history page for one satellite.
pub async fn locations_by_satellite(
    State(state): State<AppState>,
    Path(sat_id): Path<i64>,
    Query(query): Query<LocationListQuery>,
) -> HandlerResult<LocationListResponse> {
    let (limit, skip) = page_window(query.limit, query.page);

    let locations = state
        .repository
        .find(
            LOCATIONS,
            FindQuery::new()
                .eq("sat_id", sat_id)
                .sort_desc("timestamp")
                .skip(skip)
                .limit(limit),
        )
        .await?;
    let total = state
        .repository
        .count(LOCATIONS, FindQuery::new().eq("sat_id", sat_id))
        .await?;

    Ok(Json(LocationListResponse {
        status: "success".to_string(),
        results: locations.len(),
        total,
        locations,
    }))
}

// =============================================================================
// ISS Endpoints
// =============================================================================

async fn require_tracked_satellite(state: &AppState) -> Result<i64, AppError> {
    let sat_id = state.tracking.iss_sat_id;
    match db_services::find_satellite(state.repository.as_ref(), sat_id).await? {
        Some(_) => Ok(sat_id),
        None => Err(AppError::NotFound(format!(
            "ISS satellite with id {} not found in store",
            sat_id
        ))),
    }
}

/// GET /v1/iss/sun
///
/// Time windows during which the ISS was exposed to the sun, up to the most
/// recent captured sample.
pub async fn iss_sun(State(state): State<AppState>) -> HandlerResult<IssSunResponse> {
    let sat_id = require_tracked_satellite(&state).await?;

    let locations = db_services::locations_by_time_asc(state.repository.as_ref(), sat_id).await?;

    // A malformed stored sample invalidates the whole timeline; surface a
    // generic server error and keep the precise cause in the logs.
    let windows = extract_daylight_windows(&locations).map_err(|e| {
        tracing::error!("daylight window extraction failed: {}", e);
        AppError::Internal("Failed to compute daylight windows".to_string())
    })?;

    Ok(Json(IssSunResponse {
        sat_id,
        results: windows.len(),
        windows,
    }))
}

/// GET /v1/iss/position
///
/// Last known position of the ISS. The poller captures at the maximum
/// frequency the upstream API allows, so the newest sample stands in for
/// the present time.
pub async fn iss_position(State(state): State<AppState>) -> HandlerResult<IssPositionResponse> {
    let sat_id = require_tracked_satellite(&state).await?;

    let latest = db_services::latest_location(state.repository.as_ref(), sat_id).await?;

    let mut response = IssPositionResponse {
        sat_id,
        latitude: None,
        longitude: None,
        timestamp: None,
    };

    if let Some(location) = latest {
        response.latitude = location.get("latitude").and_then(Value::as_f64);
        response.longitude = location.get("longitude").and_then(Value::as_f64);
        response.timestamp = location
            .get("timestamp")
            .and_then(Value::as_f64)
            .and_then(|seconds| {
                let whole = seconds.floor();
                DateTime::from_timestamp(whole as i64, ((seconds - whole) * 1e9) as u32)
            });
    }

    Ok(Json(response))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod handlers_tests;
