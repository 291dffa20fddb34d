use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Opaque credential for the avatar service. The core never inspects it.
    pub heygen_api_key: String,
    pub heygen_api_base: String,
    /// Stream quality requested when creating sessions.
    pub avatar_quality: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let heygen_api_key = std::env::var("HEYGEN_API_KEY")
            .map_err(|_| ConfigError::MissingVar("HEYGEN_API_KEY".to_string()))?;

        let heygen_api_base = std::env::var("HEYGEN_API_BASE")
            .unwrap_or_else(|_| "https://api.heygen.com/v1".to_string());

        let avatar_quality =
            std::env::var("AVATAR_QUALITY").unwrap_or_else(|_| "high".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            heygen_api_key,
            heygen_api_base,
            avatar_quality,
            log_level,
        })
    }
}
