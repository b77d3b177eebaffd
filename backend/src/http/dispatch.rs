//! Uniform handler dispatch.
//!
//! Every endpoint funnels its work through [`execute`], which runs the handler
//! exactly once and maps the outcome onto the response contract:
//!
//! | outcome                                   | status | body                        | log   |
//! |-------------------------------------------|--------|-----------------------------|-------|
//! | result without `error` key                | 200    | result                      | -     |
//! | result with `error` key / user-facing err | 400    | `{error}`                   | warn  |
//! | internal error                            | 400    | `{error, timestamp}`        | error |
//!
//! An absent or `null` result becomes `{"error": "Nothing to return"}` first.
//! Every response is JSON and carries `Access-Control-Allow-Origin: *`.

use std::future::Future;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use super::error::{error_entry, ErrorEnvelope};
use crate::services::error::{ServiceError, ServiceResult};

/// What a handler hands to the dispatcher. `None` means "nothing to return".
pub type HandlerResult = ServiceResult<Option<Value>>;

/// Run `handler` once and turn its outcome into the HTTP response.
pub async fn execute<F, Fut>(handler: F) -> Response
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let body = match handler().await {
        Ok(result) => {
            let body = result
                .filter(|value| !value.is_null())
                .unwrap_or_else(|| ErrorEnvelope::nothing_to_return().into());
            if let Some(message) = error_entry(&body) {
                warn!(error = %message, "handler reported an error");
            }
            body
        }
        Err(err) if err.is_user_facing() => {
            warn!(kind = err.kind(), error = %err, "request rejected");
            ErrorEnvelope::new(err.to_string()).into()
        }
        Err(err) => {
            let timestamp = correlation_timestamp();
            error!(timestamp = %timestamp, error = ?err, "internal error while handling request");
            ErrorEnvelope::internal(timestamp).into()
        }
    };

    send_response(body)
}

/// Serialize a handler's success value.
pub fn to_body<T: Serialize>(value: &T) -> HandlerResult {
    let body = serde_json::to_value(value).context("Failed to serialize response body")?;
    Ok(Some(body))
}

/// JSON response with the status implied by the body.
pub fn send_response(body: Value) -> Response {
    let status = if error_entry(&body).is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// UTC timestamp shared by the client envelope and the server log record.
fn correlation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Map a failed blocking task onto an internal error.
pub async fn run_blocking<T, F>(task: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ServiceError::internal(format!("Task join error: {}", e)))?
}
