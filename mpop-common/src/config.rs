//! Bootstrap configuration loading
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `MPOP_CONFIG` environment variable
//! 3. Platform config dir (`~/.config/mpop/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file at the platform location is not an error. A file
//! named explicitly (tiers 1 and 2) must exist and parse.
//!
//! API keys can additionally be supplied through `MPOP_UN_API_KEY` and
//! `MPOP_TMDB_API_KEY`, which override whatever the file says.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MPOP_CONFIG";

/// Environment override for the UN Data Portal API key
pub const UN_API_KEY_ENV_VAR: &str = "MPOP_UN_API_KEY";

/// Environment override for the TMDB API key
pub const TMDB_API_KEY_ENV_VAR: &str = "MPOP_TMDB_API_KEY";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Interface the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the UN population data portal API
    #[serde(default = "default_un_api_url")]
    pub un_api_url: String,

    /// Sent verbatim in the `Authorization` header
    #[serde(default)]
    pub un_api_key: Option<String>,

    /// Base URL of the TMDB API
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Per-request timeout for upstream calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrent requests per upstream API within one query
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Widest year range a single query may ask for
    #[serde(default = "default_max_year_span")]
    pub max_year_span: usize,

    /// Origin allowed by the CORS layer (the charting frontend)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_un_api_url() -> String {
    "https://population.un.org/dataportalapi/api".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Default for `max_concurrent_requests`
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Default for `max_year_span`
pub const DEFAULT_MAX_YEAR_SPAN: usize = 200;

fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

fn default_max_year_span() -> usize {
    DEFAULT_MAX_YEAR_SPAN
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            un_api_url: default_un_api_url(),
            un_api_key: None,
            tmdb_api_url: default_tmdb_api_url(),
            tmdb_api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_year_span: default_max_year_span(),
            allowed_origin: default_allowed_origin(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Replace API keys with non-blank environment overrides
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(key) = env_key(UN_API_KEY_ENV_VAR) {
            info!("UN API key loaded from environment variable");
            self.un_api_key = Some(key);
        }
        if let Some(key) = env_key(TMDB_API_KEY_ENV_VAR) {
            info!("TMDB API key loaded from environment variable");
            self.tmdb_api_key = Some(key);
        }
        self
    }

    /// `host:port` for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|k| !k.trim().is_empty())
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    PlatformDefault(PathBuf),
    CompiledDefaults,
}

/// Resolves and loads the bootstrap configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Determine the config source following the priority order
    pub fn source(&self) -> ConfigSource {
        if let Some(path) = &self.cli_path {
            return ConfigSource::CommandLine(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return ConfigSource::Environment(PathBuf::from(path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => ConfigSource::PlatformDefault(path),
            _ => ConfigSource::CompiledDefaults,
        }
    }

    /// Load configuration from the resolved source, then apply env overrides
    pub fn load(&self) -> Result<TomlConfig> {
        let config = match self.source() {
            ConfigSource::CommandLine(path)
            | ConfigSource::Environment(path)
            | ConfigSource::PlatformDefault(path) => {
                let config = load_toml_config(&path)?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            ConfigSource::CompiledDefaults => {
                warn!("No config file found, using compiled defaults");
                TomlConfig::default()
            }
        };

        Ok(config.apply_env_overrides())
    }
}

/// Platform config file location (`<config_dir>/mpop/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mpop").join("config.toml"))
}

/// Read and parse one TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Read config {} failed: {}", path.display(), e))
    })?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config {} failed: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.logging.level, "info");
        assert!(config.un_api_key.is_none());
        assert_eq!(config.max_concurrent_requests, DEFAULT_MAX_CONCURRENT_REQUESTS);
        assert_eq!(config.max_year_span, DEFAULT_MAX_YEAR_SPAN);
    }

    #[test]
    fn test_fetch_limits_from_toml() {
        let config: TomlConfig = toml::from_str(
            r#"
            max_concurrent_requests = 2
            max_year_span = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.max_concurrent_requests, 2);
        assert_eq!(config.max_year_span, 50);
        assert_eq!(config.port, default_port());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 9000
            tmdb_api_key = "abc"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.un_api_url, default_un_api_url());
    }

    #[test]
    fn test_cli_path_has_priority() {
        let resolver = ConfigResolver::new(Some(PathBuf::from("/tmp/mpop-cli.toml")));
        assert_eq!(
            resolver.source(),
            ConfigSource::CommandLine(PathBuf::from("/tmp/mpop-cli.toml"))
        );
    }
}
