//! In-memory document repository.
//!
//! Backs the store with a `parking_lot::RwLock` over per-collection vectors.
//! This is the only backend the service ships; a persistent database would
//! slot in behind the same [`DocumentRepository`] trait.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::db::repository::{
    Document, DocumentRepository, ErrorContext, FindQuery, Predicate, RepositoryError,
    RepositoryResult, SortOrder, ID_FIELD,
};
use crate::db::schema::{self, CollectionSpec};

/// In-memory repository over JSON documents.
pub struct LocalRepository {
    collections: RwLock<HashMap<&'static str, Vec<Document>>>,
}

impl LocalRepository {
    /// Create an empty repository with all known collections.
    pub fn new() -> Self {
        let mut collections = HashMap::new();
        for spec in schema::collections() {
            collections.insert(spec.name, Vec::new());
        }
        Self {
            collections: RwLock::new(collections),
        }
    }

    fn spec_for(collection: &str, operation: &str) -> RepositoryResult<&'static CollectionSpec> {
        schema::spec(collection).ok_or_else(|| {
            RepositoryError::internal_with_context(
                format!("Unknown collection `{}`", collection),
                ErrorContext::new(operation).with_collection(collection),
            )
        })
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality that treats integer and float encodings of the same number as
/// equal, the way a document database matches numeric fields.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn matches(document: &Document, filter: &[(String, Predicate)]) -> bool {
    filter.iter().all(|(field, predicate)| match predicate {
        Predicate::Eq(expected) => document
            .get(field)
            .is_some_and(|value| values_equal(value, expected)),
        Predicate::Contains(needle) => document
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
    })
}

/// Sort comparison over optional field values. Missing fields and nulls sort
/// first; numbers compare numerically, strings lexicographically.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x, y) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Number(_), Value::Number(_)) => {
                let (nx, ny) = (x.as_f64(), y.as_f64());
                nx.partial_cmp(&ny).unwrap_or(Ordering::Equal)
            }
            (Value::String(sx), Value::String(sy)) => sx.cmp(sy),
            (Value::Bool(bx), Value::Bool(by)) => bx.cmp(by),
            _ => Ordering::Equal,
        },
    }
}

fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

#[async_trait]
impl DocumentRepository for LocalRepository {
    async fn insert(&self, collection: &str, mut document: Document) -> RepositoryResult<Document> {
        let spec = Self::spec_for(collection, "insert")?;
        if document.is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Document must not be empty",
                ErrorContext::new("insert").with_collection(collection),
            ));
        }

        let mut collections = self.collections.write();

        if let Some(unique) = spec.unique_field {
            let value = document.get(unique).cloned().ok_or_else(|| {
                RepositoryError::validation_with_context(
                    format!("`{}` is required for this collection", unique),
                    ErrorContext::new("insert").with_collection(collection),
                )
            })?;
            let duplicate = collections
                .get(collection)
                .map(|rows| {
                    rows.iter()
                        .any(|row| row.get(unique).is_some_and(|v| values_equal(v, &value)))
                })
                .unwrap_or(false);
            if duplicate {
                return Err(RepositoryError::validation_with_context(
                    format!("`{}` with value {} already exists", unique, value),
                    ErrorContext::new("insert").with_collection(collection),
                ));
            }
        }

        if let Some(reference) = &spec.reference {
            // The reference is only validated when the field is present;
            // schema-level required fields are the HTTP boundary's job.
            if let Some(ref_value) = document.get(reference.field) {
                let exists = collections
                    .get(reference.collection)
                    .map(|rows| {
                        rows.iter().any(|row| {
                            row.get(reference.field)
                                .is_some_and(|v| values_equal(v, ref_value))
                        })
                    })
                    .unwrap_or(false);
                if !exists {
                    return Err(RepositoryError::validation_with_context(
                        format!(
                            "Reference `{}` with value {} does not exist",
                            reference.field, ref_value
                        ),
                        ErrorContext::new("insert").with_collection(collection),
                    ));
                }
            }
        }

        document.insert(
            ID_FIELD.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        let rows = collections.get_mut(spec.name).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Collection storage missing",
                ErrorContext::new("insert").with_collection(collection),
            )
        })?;
        rows.push(document.clone());
        Ok(document)
    }

    async fn get(&self, collection: &str, id: &str) -> RepositoryResult<Document> {
        let spec = Self::spec_for(collection, "get")?;
        let collections = self.collections.read();
        collections
            .get(spec.name)
            .and_then(|rows| rows.iter().find(|row| document_id(row) == Some(id)))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Document not found",
                    ErrorContext::new("get")
                        .with_collection(collection)
                        .with_document_id(id),
                )
            })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> RepositoryResult<Document> {
        let spec = Self::spec_for(collection, "update")?;
        if patch.is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Update patch must not be empty",
                ErrorContext::new("update").with_collection(collection),
            ));
        }

        let mut collections = self.collections.write();

        if let Some(reference) = &spec.reference {
            if let Some(ref_value) = patch.get(reference.field) {
                let exists = collections
                    .get(reference.collection)
                    .map(|rows| {
                        rows.iter().any(|row| {
                            row.get(reference.field)
                                .is_some_and(|v| values_equal(v, ref_value))
                        })
                    })
                    .unwrap_or(false);
                if !exists {
                    return Err(RepositoryError::validation_with_context(
                        format!(
                            "Reference `{}` with value {} does not exist",
                            reference.field, ref_value
                        ),
                        ErrorContext::new("update").with_collection(collection),
                    ));
                }
            }
        }

        let rows = collections.get_mut(spec.name).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Collection storage missing",
                ErrorContext::new("update").with_collection(collection),
            )
        })?;
        let row = rows
            .iter_mut()
            .find(|row| document_id(row) == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Document not found for update",
                    ErrorContext::new("update")
                        .with_collection(collection)
                        .with_document_id(id),
                )
            })?;
        for (field, value) in patch {
            if field == ID_FIELD {
                continue;
            }
            row.insert(field, value);
        }
        Ok(row.clone())
    }

    async fn remove(&self, collection: &str, id: &str) -> RepositoryResult<Document> {
        let spec = Self::spec_for(collection, "remove")?;
        let mut collections = self.collections.write();

        let removed = {
            let rows = collections.get_mut(spec.name).ok_or_else(|| {
                RepositoryError::internal_with_context(
                    "Collection storage missing",
                    ErrorContext::new("remove").with_collection(collection),
                )
            })?;
            let index = rows
                .iter()
                .position(|row| document_id(row) == Some(id))
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "Document not found for deletion",
                        ErrorContext::new("remove")
                            .with_collection(collection)
                            .with_document_id(id),
                    )
                })?;
            rows.remove(index)
        };

        if let Some(cascade) = &spec.cascade {
            if let Some(value) = removed.get(cascade.field).cloned() {
                if let Some(rows) = collections.get_mut(cascade.collection) {
                    let before = rows.len();
                    rows.retain(|row| {
                        !row.get(cascade.field)
                            .is_some_and(|v| values_equal(v, &value))
                    });
                    tracing::debug!(
                        collection = cascade.collection,
                        removed = before - rows.len(),
                        "cascaded deletion of dependent documents"
                    );
                }
            }
        }

        Ok(removed)
    }

    async fn find(&self, collection: &str, query: FindQuery) -> RepositoryResult<Vec<Document>> {
        let spec = Self::spec_for(collection, "find")?;
        let collections = self.collections.read();
        let rows = collections.get(spec.name).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Collection storage missing",
                ErrorContext::new("find").with_collection(collection),
            )
        })?;

        let mut matched: Vec<Document> = rows
            .iter()
            .filter(|row| matches(row, &query.filter))
            .cloned()
            .collect();

        if let Some((field, order)) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let results = matched.into_iter().skip(query.skip);
        Ok(match query.limit {
            Some(limit) => results.take(limit).collect(),
            None => results.collect(),
        })
    }

    async fn find_one(
        &self,
        collection: &str,
        query: FindQuery,
    ) -> RepositoryResult<Option<Document>> {
        let results = self.find(collection, query.limit(1)).await?;
        Ok(results.into_iter().next())
    }

    async fn count(&self, collection: &str, query: FindQuery) -> RepositoryResult<u64> {
        let spec = Self::spec_for(collection, "count")?;
        let collections = self.collections.read();
        let rows = collections.get(spec.name).ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Collection storage missing",
                ErrorContext::new("count").with_collection(collection),
            )
        })?;
        Ok(rows.iter().filter(|row| matches(row, &query.filter)).count() as u64)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
