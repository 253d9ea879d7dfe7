//! Repository implementations module.
//!
//! The in-memory `local` backend is the only implementation; the
//! `DocumentRepository` trait is the seam where a persistent document
//! database would plug in.

pub mod local;

pub use local::LocalRepository;
