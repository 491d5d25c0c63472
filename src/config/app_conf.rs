use std::env;
use tracing::{debug, warn};

use crate::config::{parse_flag, ConfigError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Guard mutating dish and ingredient routes with a bearer token
    pub auth_required: bool,
    /// Insert the sample dishes on startup when the collection is empty
    pub seed_database: bool,
}

impl AppConfig {
    /// Expected environment variables:
    /// - APP_HOST (defaults to 127.0.0.1)
    /// - APP_PORT (defaults to 8080)
    /// - AUTH_REQUIRED (defaults to true)
    /// - SEED_DATABASE (defaults to false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue(format!("APP_PORT: '{}' is not a port number", raw)))?,
            Err(_) => {
                warn!("APP_PORT not set, using default: 8080");
                8080
            }
        };

        let auth_required = match env::var("AUTH_REQUIRED") {
            Ok(raw) => parse_flag("AUTH_REQUIRED", &raw)?,
            Err(_) => true,
        };
        if !auth_required {
            warn!("AUTH_REQUIRED is false, mutating routes are open to anyone");
        }

        let seed_database = match env::var("SEED_DATABASE") {
            Ok(raw) => parse_flag("SEED_DATABASE", &raw)?,
            Err(_) => false,
        };

        let config = AppConfig { host, port, auth_required, seed_database };
        config.validate()?;
        debug!(?config, "Application configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("APP_HOST cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            auth_required: true,
            seed_database: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.auth_required);
        assert!(!config.seed_database);
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = AppConfig::default();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
