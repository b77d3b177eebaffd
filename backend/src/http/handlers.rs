//! HTTP handlers for the REST API.
//!
//! Each handler validates and parses its inputs, then delegates to the
//! service layer or the astronomy collaborator. All of them answer through
//! [`dispatch::execute`], so extractor rejections are reported in the same
//! envelope as every other failure.

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};

use super::dispatch::{self, run_blocking, to_body};
use super::dto::{FieldLinesResponse, HealthResponse};
use super::state::AppState;
use crate::models::parse_date;
use crate::routes::{events, positions};
use crate::services::{require, validate, EventPositionQuery, ServiceError, ServiceResult};

type QueryParams = Result<Query<HashMap<String, String>>, QueryRejection>;
type DatePath = Result<Path<String>, PathRejection>;

fn query_params(query: QueryParams) -> ServiceResult<HashMap<String, String>> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ServiceError::Domain(rejection.body_text()))
}

fn path_date(path: DatePath) -> ServiceResult<String> {
    path.map(|Path(date)| date)
        .map_err(|rejection| ServiceError::Domain(rejection.body_text()))
}

/// Host the client addressed, from the `Host` header or the request URI.
fn request_host(headers: &HeaderMap, uri: &Uri) -> ServiceResult<String> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Domain("Missing Host header".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Response {
    dispatch::execute(move || async move {
        to_body(&HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            astro_configured: state.astro_configured,
        })
    })
    .await
}

// =============================================================================
// Field Lines
// =============================================================================

/// GET /lines/gong/{date}
///
/// Location and timestamp of the GONG field-line file nearest to `date`.
pub async fn get_gong_field_lines(
    State(state): State<AppState>,
    path: DatePath,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    dispatch::execute(move || async move {
        let date = parse_date(&path_date(path)?)?;
        let host = request_host(&headers, &uri)?;
        let archive = state.archive.clone();

        let location = run_blocking(move || archive.locate_gong(&host, &date)).await?;
        to_body(&location)
    })
    .await
}

/// GET /lines/{date}
///
/// Location of the generic field-line file nearest to `date`.
pub async fn get_field_lines(
    State(state): State<AppState>,
    path: DatePath,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    dispatch::execute(move || async move {
        let date = parse_date(&path_date(path)?)?;
        let host = request_host(&headers, &uri)?;
        let archive = state.archive.clone();

        let location = run_blocking(move || archive.locate_lines(&host, &date)).await?;
        to_body(&FieldLinesResponse::from(location))
    })
    .await
}

// =============================================================================
// Delegated Endpoints
// =============================================================================

/// GET /observer/position?id=
pub async fn get_observer_position(State(state): State<AppState>, query: QueryParams) -> Response {
    dispatch::execute(move || async move {
        let params = query_params(query)?;
        validate(&params, positions::OBSERVER_POSITION_PARAMS)?;

        state.astro.observer_position(require(&params, "id")?).await
    })
    .await
}

/// GET /event?start=&end=
pub async fn get_events(State(state): State<AppState>, query: QueryParams) -> Response {
    dispatch::execute(move || async move {
        let params = query_params(query)?;
        validate(&params, events::EVENTS_PARAMS)?;

        state
            .astro
            .events(require(&params, "start")?, require(&params, "end")?)
            .await
    })
    .await
}

/// GET /psp?start=&end=
pub async fn get_psp_position(State(state): State<AppState>, query: QueryParams) -> Response {
    dispatch::execute(move || async move {
        let params = query_params(query)?;
        validate(&params, positions::PSP_PARAMS)?;
        let start = parse_date(require(&params, "start")?)?;
        let end = parse_date(require(&params, "end")?)?;

        state.astro.psp_position(&start, &end).await
    })
    .await
}

/// GET /event/position?system=&coord1=&coord2=[&coord3=]&date=&observatory=&units=
pub async fn get_event_position(State(state): State<AppState>, query: QueryParams) -> Response {
    dispatch::execute(move || async move {
        let params = query_params(query)?;
        validate(&params, positions::EVENT_POSITION_PARAMS)?;

        let request = EventPositionQuery {
            system: require(&params, "system")?.to_string(),
            coord1: require(&params, "coord1")?.to_string(),
            coord2: require(&params, "coord2")?.to_string(),
            coord3: params.get(positions::EVENT_POSITION_COORD3).cloned(),
            date: parse_date(require(&params, "date")?)?,
            observatory: require(&params, "observatory")?.to_string(),
            units: require(&params, "units")?.to_string(),
        };
        state.astro.event_position(&request).await
    })
    .await
}

/// GET /earth/{date}
pub async fn get_earth_position(State(state): State<AppState>, path: DatePath) -> Response {
    dispatch::execute(move || async move {
        let date = parse_date(&path_date(path)?)?;
        state.astro.earth_position(&date).await
    })
    .await
}

/// Any unrouted path.
pub async fn unknown_endpoint(uri: Uri) -> Response {
    dispatch::execute(move || async move {
        Err(ServiceError::Domain(format!("Unknown endpoint {}", uri.path())))
    })
    .await
}

/// A routed path requested with a method other than GET.
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    dispatch::execute(move || async move {
        Err(ServiceError::Domain(format!(
            "Method {} not allowed for {}",
            method,
            uri.path()
        )))
    })
    .await
}
