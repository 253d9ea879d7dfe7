//! # Satwatch Backend
//!
//! Satellite position tracking service for the ISS and friends.
//!
//! This crate polls a remote satellite-location API on a fixed interval,
//! persists the position samples in a document store, and exposes a REST API
//! for querying raw location history and a derived "sunlight exposure"
//! timeline. The sunlight timeline is computed by a pure interval-extraction
//! routine over the stored visibility samples.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`config`]: Application configuration (TOML file + environment)
//! - [`models`]: Typed satellite and location schemas
//! - [`db`]: Document store, repository trait, and the in-memory backend
//! - [`services`]: Business logic, notably the daylight-window extractor
//! - [`poller`]: Background task that captures satellite positions
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod poller;
pub mod services;
