//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::overview::OverviewConfig;
use crate::page::{ContentError, PageContent};

/// Environment variable holding the overview endpoint URL
pub const ENDPOINT_ENV: &str = "OVERVIEW_API_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub overview: OverviewSettings,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Overview API settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewSettings {
    /// Absolute http(s) URL returning `{ total_articles, article_counts }`
    #[serde(default)]
    pub endpoint_url: String,

    /// Optional request timeout; unset waits for the upstream indefinitely
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl OverviewSettings {
    pub fn client_config(&self) -> OverviewConfig {
        OverviewConfig {
            endpoint_url: self.endpoint_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Page content settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageConfig {
    /// Contributors TOML file; the bundled list is used when unset
    pub contributors_file: Option<String>,
}

impl PageConfig {
    /// Build the page content for this configuration
    pub fn load_content(&self) -> Result<PageContent, ContentError> {
        match &self.contributors_file {
            Some(path) => PageContent::with_contributors_file(Path::new(path)),
            None => PageContent::bundled(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("kirundi-overview").join("config.toml")),
            Some(PathBuf::from("/etc/kirundi-overview/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key/value lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Overview overrides
        if let Some(url) = lookup(ENDPOINT_ENV) {
            self.overview.endpoint_url = url;
        }
        if let Some(timeout) = lookup("KIRUNDI_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.overview.request_timeout_ms = Some(ms);
            }
        }

        // Server overrides
        if let Some(host) = lookup("KIRUNDI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("KIRUNDI_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Page overrides
        if let Some(path) = lookup("KIRUNDI_CONTRIBUTORS_FILE") {
            self.page.contributors_file = Some(path);
        }

        // Logging overrides
        if let Some(level) = lookup("KIRUNDI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("KIRUNDI_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.overview.endpoint_url.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "overview.endpoint_url is not set (set it in config.toml or {})",
                ENDPOINT_ENV
            )));
        }

        let url = Url::parse(endpoint).map_err(|e| {
            ConfigError::Invalid(format!("overview.endpoint_url {:?}: {}", endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::Invalid(format!(
                "overview.endpoint_url {:?} must be an absolute http(s) URL",
                endpoint
            )));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Kirundi NLP overview site configuration
#
# Environment variables override these settings:
# - OVERVIEW_API_URL
# - KIRUNDI_REQUEST_TIMEOUT_MS
# - KIRUNDI_HOST
# - KIRUNDI_PORT
# - KIRUNDI_CONTRIBUTORS_FILE
# - KIRUNDI_LOG_LEVEL
# - KIRUNDI_LOG_FORMAT

[server]
# Host to bind to
host = "0.0.0.0"

# Port to listen on
port = 3000

# Allowed CORS origins for /api routes (empty allows none)
cors_origins = []

[overview]
# Endpoint returning { "total_articles": ..., "article_counts": [...] }
endpoint_url = "http://localhost:8000/overview"

# Request timeout in milliseconds (unset waits indefinitely)
# request_timeout_ms = 10000

[page]
# Contributors list (defaults to the bundled data/contributors.toml)
# contributors_file = "/etc/kirundi-overview/contributors.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.overview.endpoint_url, "http://localhost:8000/overview");
        assert_eq!(config.overview.request_timeout_ms, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overview]\nendpoint_url = \"https://stats.example.org/overview\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(
            config.overview.endpoint_url,
            "https://stats.example.org/overview"
        );
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENDPOINT_ENV, "https://api.example.org/overview"),
            ("KIRUNDI_PORT", "8080"),
            ("KIRUNDI_LOG_FORMAT", "json"),
            ("KIRUNDI_REQUEST_TIMEOUT_MS", "2500"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.overview.endpoint_url, "https://api.example.org/overview");
        assert_eq!(config.overview.request_timeout_ms, Some(2500));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "KIRUNDI_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.overview.endpoint_url = "localhost/overview".to_string();
        assert!(config.validate().is_err());

        config.overview.endpoint_url = "file:///tmp/overview.json".to_string();
        assert!(config.validate().is_err());

        config.overview.endpoint_url = "https://api.example.org/overview".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_log_format() {
        let mut config = Config::default();
        config.overview.endpoint_url = "https://api.example.org/overview".to_string();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config() {
        let settings = OverviewSettings {
            endpoint_url: "https://api.example.org/overview".to_string(),
            request_timeout_ms: Some(100),
        };
        let client = settings.client_config();
        assert_eq!(client.endpoint_url, settings.endpoint_url);
        assert_eq!(client.request_timeout_ms, Some(100));
    }

    #[test]
    fn test_page_config_uses_bundled_contributors() {
        let content = PageConfig::default().load_content().unwrap();
        assert_eq!(content.title, "Kirundi NLP");
    }
}
