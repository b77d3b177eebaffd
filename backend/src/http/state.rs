//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::astro::{self, AstroService};
use crate::services::{FieldLineArchive, ServiceResult};

/// Shared application state passed to all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Field-line archives on the local filesystem
    pub archive: Arc<FieldLineArchive>,
    /// Astronomy collaborator for delegated endpoints
    pub astro: Arc<dyn AstroService>,
    /// Whether `astro` talks to a real collaborator
    pub astro_configured: bool,
}

impl AppState {
    pub fn new(archive: FieldLineArchive, astro: Arc<dyn AstroService>, astro_configured: bool) -> Self {
        Self {
            archive: Arc::new(archive),
            astro,
            astro_configured,
        }
    }

    /// Build the state described by `config`.
    pub fn from_config(config: &ServerConfig) -> ServiceResult<Self> {
        Ok(Self::new(
            FieldLineArchive::from_settings(&config.resources),
            astro::from_settings(&config.astro)?,
            config.astro.base_url.is_some(),
        ))
    }
}
