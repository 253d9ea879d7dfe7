//! Document repository trait for the sample store.
//!
//! The store holds JSON documents in named collections. Collections may
//! declare a unique key, a reference into another collection, and a cascade
//! rule (see [`crate::db::schema`]); implementations enforce those at write
//! time.

use async_trait::async_trait;
use serde_json::Value;

use super::error::RepositoryResult;

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the server-generated document ID.
pub const ID_FIELD: &str = "_id";

/// Sort direction for [`FindQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A single field predicate in a [`FindQuery`] filter.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Field equals the given value. Integer and float representations of
    /// the same number compare equal.
    Eq(Value),
    /// Field is a string containing the given needle, case-insensitively.
    Contains(String),
}

/// Query description for `find`, `find_one` and `count`.
///
/// Filters are conjunctive: a document matches when every predicate holds.
/// `sort`, `skip` and `limit` are applied in that order, after filtering.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Vec<(String, Predicate)>,
    pub sort: Option<(String, SortOrder)>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality predicate.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.push((field.into(), Predicate::Eq(value.into())));
        self
    }

    /// Add a case-insensitive substring predicate.
    pub fn contains(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.filter
            .push((field.into(), Predicate::Contains(needle.into())));
        self
    }

    /// Sort results ascending by the given field.
    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some((field.into(), SortOrder::Ascending));
        self
    }

    /// Sort results descending by the given field.
    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some((field.into(), SortOrder::Descending));
        self
    }

    /// Skip the first `n` results.
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    /// Return at most `n` results.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// Repository trait for document store operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document into a collection.
    ///
    /// Generates the `_id` field and enforces the collection's unique-key
    /// and reference constraints.
    ///
    /// # Returns
    /// * `Ok(Document)` - The stored document including its `_id`
    /// * `Err(RepositoryError)` - On constraint violation or unknown collection
    async fn insert(&self, collection: &str, document: Document) -> RepositoryResult<Document>;

    /// Retrieve a document by its `_id`.
    async fn get(&self, collection: &str, id: &str) -> RepositoryResult<Document>;

    /// Merge `patch` into the document with the given `_id`.
    ///
    /// The `_id` field itself is immutable and ignored in patches. When the
    /// patch touches the collection's reference field, the reference is
    /// re-validated.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> RepositoryResult<Document>;

    /// Delete a document by its `_id`, applying the collection's cascade
    /// rule to dependent documents.
    ///
    /// # Returns
    /// * `Ok(Document)` - The removed document
    async fn remove(&self, collection: &str, id: &str) -> RepositoryResult<Document>;

    /// Find documents matching the query.
    async fn find(&self, collection: &str, query: FindQuery) -> RepositoryResult<Vec<Document>>;

    /// Find the first document matching the query, honoring its sort order.
    async fn find_one(
        &self,
        collection: &str,
        query: FindQuery,
    ) -> RepositoryResult<Option<Document>>;

    /// Count documents matching the query's filter. Sort, skip and limit
    /// are ignored.
    async fn count(&self, collection: &str, query: FindQuery) -> RepositoryResult<u64>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
