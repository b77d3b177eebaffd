//! Data Transfer Objects for the HTTP API.
//!
//! Success bodies for endpoints whose shape is owned by this service. Bodies of
//! delegated endpoints are produced by the astronomy collaborator.

use serde::{Deserialize, Serialize};

pub use crate::models::ResourceLocation;

/// Response for `/lines/{date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLinesResponse {
    /// Absolute URL of the field-line file
    pub path: String,
}

impl From<ResourceLocation> for FieldLinesResponse {
    fn from(location: ResourceLocation) -> Self {
        Self {
            path: location.path,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Whether an astronomy collaborator URL is configured
    pub astro_configured: bool,
}
