//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    instructor_roles, store_backends, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub database: DatabaseConfig,
    pub roster: RosterConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which membership store backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// Store selection
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Required when the postgres backend is selected
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Defaults applied by role transitions
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Role name given to students promoted to instructor
    pub default_instructor_role: String,
    /// Display name given to students promoted to instructor
    pub default_instructor_display_name: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_instructor_role: instructor_roles::COOWNER.to_string(),
            default_instructor_display_name: DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let store = StoreConfig::from_env()?;
        let database = DatabaseConfig::from_env()?;

        if store.backend == StoreBackend::Postgres && database.url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL".to_string()));
        }

        Ok(Self {
            server: ServerConfig::from_env()?,
            store,
            database,
            roster: RosterConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Err(_) | Ok("pretty") => LogFormat::Pretty,
                Ok("json") => LogFormat::Json,
                Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            },
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("STORE_BACKEND").unwrap_or_else(|_| store_backends::MEMORY.to_string());
        Ok(Self {
            backend: StoreBackend::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("STORE_BACKEND".to_string()))?,
        })
    }
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            store_backends::MEMORY => Some(Self::Memory),
            store_backends::POSTGRES => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => store_backends::MEMORY,
            Self::Postgres => store_backends::POSTGRES,
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").ok(),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RosterConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let default_instructor_role =
            env::var("DEFAULT_INSTRUCTOR_ROLE").unwrap_or(defaults.default_instructor_role);

        if !instructor_roles::ALL.contains(&default_instructor_role.as_str()) {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_INSTRUCTOR_ROLE".to_string(),
            ));
        }

        Ok(Self {
            default_instructor_role,
            default_instructor_display_name: env::var("DEFAULT_INSTRUCTOR_DISPLAY_NAME")
                .unwrap_or(defaults.default_instructor_display_name),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
