//! # Helios Rust Backend
//!
//! Resource-location API for the Helios 3D heliosphere viewer.
//!
//! The backend answers "where is the data for this date?" for precomputed
//! archives (magnetic field lines) and forwards coordinate, event and position
//! queries to a separate astronomy service. Every endpoint answers with JSON
//! through one dispatcher, so clients see a single success/error contract.
//!
//! ## Architecture
//!
//! - [`models`]: Request timestamps, archive candidates, resource locations
//! - [`services`]: Validation, nearest-timestamp resolution, URL composition,
//!   astronomy collaborator client
//! - [`routes`]: Endpoint paths and their required parameters
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server, dispatcher and handlers
//!
//! ## Error contract
//!
//! User-actionable failures (missing parameters, malformed dates, no archived
//! file for a date) are returned verbatim with status 400. Anything else is
//! logged with a correlation timestamp and returned as a generic message with
//! the same timestamp.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
