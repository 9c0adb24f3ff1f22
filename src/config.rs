//! Configuration module: defaults, optional TOML file and environment overrides.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use upstream_client::{Credentials, MarketConfig, NewsConfig};

/// Default configuration file, read when present and `CONFIG_PATH` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Brokerage API configuration.
    pub alpaca: AlpacaConfig,
    /// News API configuration.
    pub finnhub: FinnhubConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// Deployment environment name.
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` or an empty list allows any origin.
    pub allow_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    /// Parses a comma-separated origin list, dropping blanks.
    #[must_use]
    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns true if any origin is allowed.
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allow_origins.is_empty() || self.allow_origins.iter().any(|o| o == "*")
    }
}

/// Brokerage API configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    /// API key id.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading API base URL.
    pub base_url: String,
    /// Market data API base URL.
    pub data_url: String,
    /// Timeout for reads, in seconds.
    pub read_timeout_secs: u64,
    /// Timeout for order submission, in seconds.
    pub write_timeout_secs: u64,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: "https://paper-api.alpaca.markets".to_string(),
            data_url: "https://data.alpaca.markets/v2".to_string(),
            read_timeout_secs: 15,
            write_timeout_secs: 20,
        }
    }
}

impl std::fmt::Debug for AlpacaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("data_url", &self.data_url)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("write_timeout_secs", &self.write_timeout_secs)
            .finish()
    }
}

/// News API configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FinnhubConfig {
    /// API token.
    pub api_key: String,
    /// News API base URL.
    pub base_url: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for FinnhubConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://finnhub.io/api/v1".to_string(),
            timeout_secs: 15,
        }
    }
}

impl std::fmt::Debug for FinnhubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the process configuration.
    ///
    /// Starts from `CONFIG_PATH` (or `config.toml` when present, defaults
    /// otherwise) and applies environment overrides on top.
    ///
    /// # Errors
    /// Returns error if the file cannot be loaded or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();

        let mut config = match lookup("CONFIG_PATH") {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides values from environment-style variables.
    ///
    /// # Errors
    /// Returns error if `PORT` is not a valid port number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a valid number, got {}", port)))?;
        }
        if let Some(env) = lookup("ENV") {
            self.server.environment = env;
        }
        if let Some(origins) = lookup("CORS_ALLOW_ORIGINS") {
            self.cors.allow_origins = CorsConfig::parse_origins(&origins);
        }
        if let Some(key) = lookup("ALPACA_API_KEY") {
            self.alpaca.api_key = key;
        }
        if let Some(secret) = lookup("ALPACA_API_SECRET") {
            self.alpaca.api_secret = secret;
        }
        if let Some(url) = lookup("ALPACA_BASE_URL") {
            self.alpaca.base_url = url;
        }
        if let Some(url) = lookup("ALPACA_DATA_URL") {
            self.alpaca.data_url = url;
        }
        if let Some(key) = lookup("FINNHUB_API_KEY") {
            self.finnhub.api_key = key;
        }
        if let Some(url) = lookup("FINNHUB_BASE_URL") {
            self.finnhub.base_url = url;
        }
        Ok(())
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue(
                "server port must be positive".to_string(),
            ));
        }

        for (name, raw) in [
            ("alpaca.base_url", &self.alpaca.base_url),
            ("alpaca.data_url", &self.alpaca.data_url),
            ("finnhub.base_url", &self.finnhub.base_url),
        ] {
            if let Err(e) = url::Url::parse(raw) {
                return Err(ConfigError::InvalidValue(format!(
                    "{} is not a valid URL ({}): {}",
                    name, raw, e
                )));
            }
        }

        if self.alpaca.read_timeout_secs == 0
            || self.alpaca.write_timeout_secs == 0
            || self.finnhub.timeout_secs == 0
        {
            return Err(ConfigError::InvalidValue(
                "timeouts must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Market client configuration derived from the `[alpaca]` section.
    #[must_use]
    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            credentials: Credentials::new(&self.alpaca.api_key, &self.alpaca.api_secret),
            trading_url: self.alpaca.base_url.clone(),
            data_url: self.alpaca.data_url.clone(),
            read_timeout: Duration::from_secs(self.alpaca.read_timeout_secs),
            write_timeout: Duration::from_secs(self.alpaca.write_timeout_secs),
        }
    }

    /// News client configuration derived from the `[finnhub]` section.
    #[must_use]
    pub fn news_config(&self) -> NewsConfig {
        NewsConfig {
            api_key: self.finnhub.api_key.clone(),
            base_url: self.finnhub.base_url.clone(),
            timeout: Duration::from_secs(self.finnhub.timeout_secs),
        }
    }
}
