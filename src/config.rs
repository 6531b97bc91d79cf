//! Configuration module for the delivery backend.

use serde::Deserialize;
use std::path::Path;

use crate::{DeliveryError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/delivery.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// How often expired entries are dropped from the revocation registry.
    #[serde(default = "default_purge_interval")]
    pub revocation_purge_interval_secs: u64,
}

fn default_purge_interval() -> u64 {
    3600 // 1 hour
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            revocation_purge_interval_secs: default_purge_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/delivery.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DeliveryError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DeliveryError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DELIVERY_JWT_SECRET`: token signing secret
    /// - `DELIVERY_DATABASE_PATH`: SQLite database path
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("DELIVERY_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
        if let Ok(path) = std::env::var("DELIVERY_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// The signing secret is mandatory; there is no fallback key.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(DeliveryError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via DELIVERY_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.auth.revocation_purge_interval_secs == 0 {
            return Err(DeliveryError::Config(
                "revocation_purge_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
