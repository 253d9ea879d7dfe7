//! Document store for satellite and location records.
//!
//! This module provides abstractions for store operations via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (HTTP handlers, position poller)      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Store Helpers (services.rs) - fixed typed queries       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Collection constraints (unique keys, references, cascade rules) are
//! declared in [`schema`] and enforced by the repository implementation.
//!
//! The repository is constructed explicitly in `main` and handed to its
//! consumers as an `Arc<dyn DocumentRepository>`; there is no process-global
//! store handle.

pub mod repositories;
pub mod repository;
pub mod schema;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{
    Document, DocumentRepository, ErrorContext, FindQuery, Predicate, RepositoryError,
    RepositoryResult, SortOrder, ID_FIELD,
};
