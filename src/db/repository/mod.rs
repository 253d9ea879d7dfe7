//! Repository trait and error types for the document store.

pub mod documents;
pub mod error;

pub use documents::{Document, DocumentRepository, FindQuery, Predicate, SortOrder, ID_FIELD};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
