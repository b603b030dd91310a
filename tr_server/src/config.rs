//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
};
use table_reservation::EngineConfig;

/// Port used when `SERVER_BIND` is not set
pub const DEFAULT_PORT: u16 = 8080;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl AppEnv {
    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(ConfigError::Invalid {
                var: "APP_ENV".to_string(),
                reason: format!("Expected development or production, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Development => write!(f, "development"),
            AppEnv::Production => write!(f, "production"),
        }
    }
}

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub app_env: AppEnv,
    /// HTTP bind address
    pub bind: SocketAddr,
    /// Prometheus scrape endpoint; metrics are disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Serialization engine configuration
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_env: AppEnv::default(),
            bind: default_bind(),
            metrics_bind: None,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        let app_env = match std::env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => AppEnv::default(),
        };

        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_env_addr("SERVER_BIND")?.unwrap_or_else(default_bind),
        };

        let metrics_bind = parse_env_addr("METRICS_BIND")?;

        Ok(ServerConfig {
            app_env,
            bind,
            metrics_bind,
            engine: EngineConfig::from_env(),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "ENGINE_*".to_string(),
                reason,
            })?;

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server bind address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

/// Helper to parse an optional socket address from the environment
fn parse_env_addr(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{}' is not a socket address: {}", value, e),
            }),
        Err(_) => Ok(None),
    }
}
