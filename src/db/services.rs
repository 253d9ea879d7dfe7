//! High-level store access helpers.
//!
//! Thin, typed wrappers over the repository trait used by the HTTP handlers
//! and the poller, so the fixed queries live in one place.

use crate::db::repository::{
    Document, DocumentRepository, ErrorContext, FindQuery, RepositoryError, RepositoryResult,
};
use crate::db::schema::{LOCATIONS, SATELLITES};
use crate::models::Location;

/// Check that the store is reachable.
pub async fn health_check(repo: &dyn DocumentRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Look up a satellite by its `sat_id` (not the document id).
pub async fn find_satellite(
    repo: &dyn DocumentRepository,
    sat_id: i64,
) -> RepositoryResult<Option<Document>> {
    repo.find_one(SATELLITES, FindQuery::new().eq("sat_id", sat_id))
        .await
}

/// All position samples for one satellite, oldest first.
///
/// This is the exact input ordering the daylight-window extractor requires.
pub async fn locations_by_time_asc(
    repo: &dyn DocumentRepository,
    sat_id: i64,
) -> RepositoryResult<Vec<Document>> {
    repo.find(
        LOCATIONS,
        FindQuery::new().eq("sat_id", sat_id).sort_asc("timestamp"),
    )
    .await
}

/// The most recent position sample for one satellite, if any.
pub async fn latest_location(
    repo: &dyn DocumentRepository,
    sat_id: i64,
) -> RepositoryResult<Option<Document>> {
    repo.find_one(
        LOCATIONS,
        FindQuery::new().eq("sat_id", sat_id).sort_desc("timestamp"),
    )
    .await
}

/// Insert a typed location sample.
pub async fn insert_location(
    repo: &dyn DocumentRepository,
    location: &Location,
) -> RepositoryResult<Document> {
    let document = location.to_document().map_err(|e| {
        RepositoryError::internal_with_context(
            format!("Failed to serialize location: {}", e),
            ErrorContext::new("insert_location").with_collection(LOCATIONS),
        )
    })?;
    repo.insert(LOCATIONS, document).await
}
