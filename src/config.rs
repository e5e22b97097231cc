//! Configuration management for the `VibePlanner` application
//!
//! Handles loading configuration from an optional TOML file and
//! `VIBEPLANNER_`-prefixed environment variables, and validates all
//! settings. The resulting value is constructed once at startup and
//! injected into the provider clients; request-handling code never reads
//! ambient state.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::PlannerError;

/// Root configuration structure for the `VibePlanner` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Provider credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Listen address settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Caller authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default request settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Credentials for the external content providers
///
/// Every credential is optional; a provider without credentials is skipped
/// at request time and contributes an empty slot.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    /// Spotify application client id
    pub spotify_client_id: Option<String>,
    /// Spotify application client secret
    pub spotify_client_secret: Option<String>,
    /// YouTube Data API key
    pub youtube_api_key: Option<String>,
    /// OMDb API key
    pub omdb_api_key: Option<String>,
    /// Google Maps API key, shared by Places and Geocoding
    pub google_maps_api_key: Option<String>,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-call timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent header for outbound calls
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Listen address settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Caller authentication settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Static bearer token; when absent the API is open
    pub bearer_token: Option<String>,
    /// Owner contact returned by the validate endpoint
    pub owner_contact: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Items requested from each provider
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
}

// Default value functions
fn default_http_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("vibe-planner/{}", env!("CARGO_PKG_VERSION"))
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8086
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_result_limit() -> u32 {
    5
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path and environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. VIBEPLANNER_PROVIDERS__OMDB_API_KEY
        builder = builder.add_source(
            Environment::with_prefix("VIBEPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to build configuration: {e}")))?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .map_err(|e| PlannerError::config(format!("Failed to deserialize configuration: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    /// Default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vibeplanner").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(PlannerError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            ));
        }

        if self.defaults.result_limit == 0 || self.defaults.result_limit > 50 {
            return Err(PlannerError::config(
                "Result limit must be between 1 and 50",
            ));
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        if let Some(token) = &self.auth.bearer_token {
            if token.is_empty() {
                return Err(PlannerError::config(
                    "Bearer token cannot be empty if provided. Either remove it or provide a value.",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.http.timeout_seconds, 20);
        assert_eq!(config.server.port, 8086);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.result_limit, 5);
        assert!(config.providers.spotify_client_id.is_none());
        assert!(config.auth.bearer_token.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PlannerConfig::default();
        config.http.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));

        let mut config = PlannerConfig::default();
        config.defaults.result_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_bearer_token() {
        let mut config = PlannerConfig::default();
        config.auth.bearer_token = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Bearer token"));
    }

    #[test]
    fn test_config_deserializes_from_partial_toml() {
        let config: PlannerConfig = toml_from_str(
            r#"
            [providers]
            omdb_api_key = "abc123"

            [server]
            port = 9000
            "#,
        );
        assert_eq!(config.providers.omdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.server.port, 9000);
        // Untouched sections keep their defaults
        assert_eq!(config.http.timeout_seconds, 20);
        assert_eq!(config.defaults.result_limit, 5);
    }

    fn toml_from_str(raw: &str) -> PlannerConfig {
        Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_config_path_generation() {
        let path = PlannerConfig::config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("vibeplanner"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
