//! Server configuration.
//!
//! Settings are read from a `helios.toml` file when one exists and then
//! overridden from the environment:
//!
//! - `HOST`, `PORT`: API bind address (default `0.0.0.0:5000`)
//! - `HELIOS_RESOURCE_ROOT`: directory holding the `gong/` and `lines/` archives
//! - `HELIOS_RESOURCE_PORT`: port of the static resource server (default 8000)
//! - `HELIOS_ASTRO_URL`: base URL of the astronomy collaborator service
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [resources]
//! root = "../resources"
//! port = 8000
//! scheme = "http"
//! gong_month_offset = 1
//!
//! [astro]
//! base_url = "http://localhost:5001"
//! timeout_secs = 30
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub resources: ResourceSettings,
    #[serde(default)]
    pub astro: AstroSettings,
}

/// API bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Archive location and how its files are published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSettings {
    #[serde(default = "default_resource_root")]
    pub root: PathBuf,
    /// Port of the static file server that publishes `root`
    #[serde(default = "default_resource_port")]
    pub port: u16,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// The GONG archive is indexed by the requested date shifted back by this
    /// many months
    #[serde(default = "default_gong_month_offset")]
    pub gong_month_offset: u32,
}

/// External astronomy service used for coordinate and event lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstroSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_resource_root() -> PathBuf {
    PathBuf::from("../resources")
}

fn default_resource_port() -> u16 {
    8000
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_gong_month_offset() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            root: default_resource_root(),
            port: default_resource_port(),
            scheme: default_scheme(),
            gong_month_offset: default_gong_month_offset(),
        }
    }
}

impl Default for AstroSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AstroSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `helios.toml` from the first standard location that has one.
    ///
    /// Searches the current directory, `backend/`, then the parent directory.
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("helios.toml"),
            PathBuf::from("backend/helios.toml"),
            PathBuf::from("../helios.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// File configuration (or defaults) with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?.unwrap_or_default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Override settings from environment variables that are set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env_port("PORT")? {
            self.server.port = port;
        }
        if let Ok(root) = env::var("HELIOS_RESOURCE_ROOT") {
            self.resources.root = PathBuf::from(root);
        }
        if let Some(port) = parse_env_port("HELIOS_RESOURCE_PORT")? {
            self.resources.port = port;
        }
        if let Ok(url) = env::var("HELIOS_ASTRO_URL") {
            self.astro.base_url = if url.trim().is_empty() { None } else { Some(url) };
        }
        Ok(())
    }

    /// `host:port` for the API listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_env_port(key: &str) -> Result<Option<u16>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.resources.root, PathBuf::from("../resources"));
        assert_eq!(config.resources.port, 8000);
        assert_eq!(config.resources.scheme, "http");
        assert_eq!(config.resources.gong_month_offset, 1);
        assert!(config.astro.base_url.is_none());
        assert_eq!(config.astro.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            [resources]
            root = "/srv/helios"
            gong_month_offset = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.resources.root, PathBuf::from("/srv/helios"));
        assert_eq!(config.resources.gong_month_offset, 0);
        assert_eq!(config.resources.port, 8000);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_full_toml() {
        let config = ServerConfig::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [resources]
            root = "data"
            port = 8080
            scheme = "https"

            [astro]
            base_url = "http://astro:5001"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.resources.scheme, "https");
        assert_eq!(config.astro.base_url.as_deref(), Some("http://astro:5001"));
        assert_eq!(config.astro.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ServerConfig::from_toml("[server]\nport = \"not a port\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file("/no/such/helios.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/helios.toml"));
    }
}
