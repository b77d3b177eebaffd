//! HTTP server module for the Helios backend.
//!
//! This module provides an axum-based HTTP server that exposes the archive
//! lookups and the astronomy collaborator as a small JSON API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Parameter validation, date parsing                     │
//! │  - Dispatcher: status codes, error envelope, logging      │
//! │  - CORS, compression, tracing                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Nearest-timestamp resolution over archive listings     │
//! │  - Resource URL composition                               │
//! │  - Astronomy collaborator client                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dispatch;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
