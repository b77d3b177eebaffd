//! Astronomy collaborator.
//!
//! Coordinate transforms, HEK event lookups and spacecraft/planet positions are
//! computed by a separate scientific service. This module defines the seam
//! ([`AstroService`]) and an HTTP client for it ([`RemoteAstroService`]).
//!
//! Results are passed through as opaque JSON. A result carrying an `error`
//! key is a user-facing failure reported by the collaborator.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ServiceError, ServiceResult};
use crate::config::AstroSettings;
use crate::models::ParsedDate;

/// Result of a collaborator call. `None` means the collaborator had nothing
/// to return.
pub type AstroResult = ServiceResult<Option<Value>>;

/// Inputs for converting an event's coordinates into HEEQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPositionQuery {
    pub system: String,
    pub coord1: String,
    pub coord2: String,
    pub coord3: Option<String>,
    pub date: ParsedDate,
    pub observatory: String,
    pub units: String,
}

#[async_trait]
pub trait AstroService: Send + Sync {
    /// HEEQ position of the observer recorded in an image's metadata.
    async fn observer_position(&self, id: &str) -> AstroResult;

    /// HEK events between `start` and `end` (passed through unparsed).
    async fn events(&self, start: &str, end: &str) -> AstroResult;

    /// Parker Solar Probe positions over a date range.
    async fn psp_position(&self, start: &ParsedDate, end: &ParsedDate) -> AstroResult;

    /// Event coordinates converted to HEEQ.
    async fn event_position(&self, query: &EventPositionQuery) -> AstroResult;

    /// Earth's HEEQ position at `date`.
    async fn earth_position(&self, date: &ParsedDate) -> AstroResult;
}

/// Pick the collaborator described by `settings`.
pub fn from_settings(settings: &AstroSettings) -> ServiceResult<Arc<dyn AstroService>> {
    match settings.base_url.as_deref() {
        Some(url) => Ok(Arc::new(RemoteAstroService::new(url, settings.timeout())?)),
        None => Ok(Arc::new(UnconfiguredAstroService)),
    }
}

/// Forwards every call as `GET <base_url>/<endpoint>` and returns the JSON body.
#[derive(Debug, Clone)]
pub struct RemoteAstroService {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteAstroService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build astro collaborator client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> AstroResult {
        let url = self.endpoint(path);
        debug!("Forwarding to astro collaborator: {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Astro collaborator request to {} failed", url))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Astro collaborator returned a non-JSON body for {} ({})", url, status))?;

        if !status.is_success() && body.get("error").is_none() {
            return Err(ServiceError::Internal(anyhow!(
                "Astro collaborator answered {} with status {}: {}",
                url,
                status,
                body
            )));
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl AstroService for RemoteAstroService {
    async fn observer_position(&self, id: &str) -> AstroResult {
        self.fetch("observer/position", &[("id", id.to_string())]).await
    }

    async fn events(&self, start: &str, end: &str) -> AstroResult {
        self.fetch("event", &[("start", start.to_string()), ("end", end.to_string())])
            .await
    }

    async fn psp_position(&self, start: &ParsedDate, end: &ParsedDate) -> AstroResult {
        self.fetch(
            "psp",
            &[("start", start.to_iso_string()), ("end", end.to_iso_string())],
        )
        .await
    }

    async fn event_position(&self, query: &EventPositionQuery) -> AstroResult {
        let mut params = vec![
            ("system", query.system.clone()),
            ("coord1", query.coord1.clone()),
            ("coord2", query.coord2.clone()),
            ("date", query.date.to_iso_string()),
            ("observatory", query.observatory.clone()),
            ("units", query.units.clone()),
        ];
        if let Some(coord3) = &query.coord3 {
            params.push(("coord3", coord3.clone()));
        }
        self.fetch("event/position", &params).await
    }

    async fn earth_position(&self, date: &ParsedDate) -> AstroResult {
        self.fetch(&format!("earth/{}", date.to_iso_string()), &[]).await
    }
}

/// Used when no collaborator URL is configured; every call is an internal
/// error so clients get the generic message and operators get a log entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAstroService;

impl UnconfiguredAstroService {
    fn unavailable(operation: &str) -> AstroResult {
        Err(ServiceError::Internal(anyhow!(
            "astro collaborator is not configured (operation: {})",
            operation
        )))
    }
}

#[async_trait]
impl AstroService for UnconfiguredAstroService {
    async fn observer_position(&self, _id: &str) -> AstroResult {
        Self::unavailable("observer_position")
    }

    async fn events(&self, _start: &str, _end: &str) -> AstroResult {
        Self::unavailable("events")
    }

    async fn psp_position(&self, _start: &ParsedDate, _end: &ParsedDate) -> AstroResult {
        Self::unavailable("psp_position")
    }

    async fn event_position(&self, _query: &EventPositionQuery) -> AstroResult {
        Self::unavailable("event_position")
    }

    async fn earth_position(&self, _date: &ParsedDate) -> AstroResult {
        Self::unavailable("earth_position")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let service = RemoteAstroService::new("http://astro:5001/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://astro:5001");
        assert_eq!(service.endpoint("/psp"), "http://astro:5001/psp");
        assert_eq!(service.endpoint("event/position"), "http://astro:5001/event/position");
    }

    #[test]
    fn test_from_settings_without_url_is_unconfigured() {
        let settings = AstroSettings::default();
        assert!(from_settings(&settings).is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_is_internal_error() {
        let service = UnconfiguredAstroService;
        let date = parse_date("2023-07-28").unwrap();
        let err = service.earth_position(&date).await.unwrap_err();
        assert!(!err.is_user_facing());
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_remote_unreachable_is_internal_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let service = RemoteAstroService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = service.observer_position("42").await.unwrap_err();
        assert!(!err.is_user_facing());
    }
}
