//! Composition of public resource URLs.

use crate::config::ResourceSettings;
use crate::models::{Candidate, ResourceLocation};

/// Builds absolute URLs for archived files served by the static resource
/// server, which listens on a fixed port on the same host as the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocationBuilder {
    scheme: String,
    port: u16,
}

impl ResourceLocationBuilder {
    pub fn new(scheme: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            port,
        }
    }

    pub fn from_settings(settings: &ResourceSettings) -> Self {
        Self::new(settings.scheme.clone(), settings.port)
    }

    /// `<scheme>://<host>:<port>/<subpath>/<filename>` plus the candidate's
    /// timestamp in ISO form.
    ///
    /// Any port on `host` (as sent in the request's `Host` header) is dropped in
    /// favour of the resource port.
    pub fn build(&self, host: &str, subpath: &str, candidate: &Candidate) -> ResourceLocation {
        let host = strip_port(host);
        let subpath = subpath.trim_matches('/');
        let path = if subpath.is_empty() {
            format!("{}://{}:{}/{}", self.scheme, host, self.port, candidate.filename())
        } else {
            format!(
                "{}://{}:{}/{}/{}",
                self.scheme,
                host,
                self.port,
                subpath,
                candidate.filename()
            )
        };

        ResourceLocation {
            path,
            date: candidate.timestamp().to_iso_string(),
        }
    }
}

/// `host[:port]` or `[v6addr][:port]` without the port.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
