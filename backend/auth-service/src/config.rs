//! Configuration management for the auth service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! Token secrets and lifetimes are required; a missing value is a fatal
//! startup condition, never a per-request error.

use anyhow::{Context, Result};
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub tokens: TokenSettings,
    pub server: ServerSettings,
    pub email: EmailSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("loaded .env file for development");
        }

        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            redis: RedisSettings::from_env()?,
            tokens: TokenSettings::from_env()?,
            server: ServerSettings::from_env()?,
            email: EmailSettings::from_env()?,
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: u64,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            acquire_timeout: env::var("DATABASE_ACQUIRE_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT")?,
        })
    }
}

/// Redis cache settings
#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub url: String,
}

impl RedisSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("REDIS_URL").context("REDIS_URL must be set")?,
        })
    }
}

/// Bearer token settings: one signing secret and one lifetime per class.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_signing_key: String,
    pub refresh_signing_key: String,
    pub access_max_age_secs: u64,
    pub refresh_max_age_secs: u64,
}

impl TokenSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            access_signing_key: env::var("ACCESS_TOKEN_SIGNING_KEY")
                .context("ACCESS_TOKEN_SIGNING_KEY must be set")?,
            refresh_signing_key: env::var("REFRESH_TOKEN_SIGNING_KEY")
                .context("REFRESH_TOKEN_SIGNING_KEY must be set")?,
            access_max_age_secs: env::var("ACCESS_TOKEN_MAX_AGE_IN_SECONDS")
                .context("ACCESS_TOKEN_MAX_AGE_IN_SECONDS must be set")?
                .parse()
                .context("Invalid ACCESS_TOKEN_MAX_AGE_IN_SECONDS")?,
            refresh_max_age_secs: env::var("REFRESH_TOKEN_MAX_AGE_IN_SECONDS")
                .context("REFRESH_TOKEN_MAX_AGE_IN_SECONDS must be set")?
                .parse()
                .context("Invalid REFRESH_TOKEN_MAX_AGE_IN_SECONDS")?,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: String,
    pub use_starttls: bool,
}

impl EmailSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            smtp_host: env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("Invalid SMTP_PORT")?,
            smtp_username: env::var("SMTP_USERNAME").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@localhost".to_string()),
            use_starttls: env::var("SMTP_USE_STARTTLS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_token_env() {
        env::set_var("ACCESS_TOKEN_SIGNING_KEY", "access-secret");
        env::set_var("REFRESH_TOKEN_SIGNING_KEY", "refresh-secret");
        env::set_var("ACCESS_TOKEN_MAX_AGE_IN_SECONDS", "900");
        env::set_var("REFRESH_TOKEN_MAX_AGE_IN_SECONDS", "604800");
    }

    fn clear_token_env() {
        env::remove_var("ACCESS_TOKEN_SIGNING_KEY");
        env::remove_var("REFRESH_TOKEN_SIGNING_KEY");
        env::remove_var("ACCESS_TOKEN_MAX_AGE_IN_SECONDS");
        env::remove_var("REFRESH_TOKEN_MAX_AGE_IN_SECONDS");
    }

    #[test]
    #[serial]
    fn token_settings_from_env() {
        set_token_env();

        let settings = TokenSettings::from_env().unwrap();
        assert_eq!(settings.access_signing_key, "access-secret");
        assert_eq!(settings.refresh_signing_key, "refresh-secret");
        assert_eq!(settings.access_max_age_secs, 900);
        assert_eq!(settings.refresh_max_age_secs, 604800);

        clear_token_env();
    }

    #[test]
    #[serial]
    fn missing_token_secret_is_fatal() {
        set_token_env();
        env::remove_var("REFRESH_TOKEN_SIGNING_KEY");

        let err = TokenSettings::from_env().unwrap_err();
        assert!(err.to_string().contains("REFRESH_TOKEN_SIGNING_KEY"));

        clear_token_env();
    }

    #[test]
    #[serial]
    fn non_numeric_lifetime_is_fatal() {
        set_token_env();
        env::set_var("ACCESS_TOKEN_MAX_AGE_IN_SECONDS", "soon");

        assert!(TokenSettings::from_env().is_err());

        clear_token_env();
    }

    #[test]
    #[serial]
    fn database_settings_defaults() {
        env::set_var("DATABASE_URL", "postgres://localhost/auth_test");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("DATABASE_ACQUIRE_TIMEOUT");

        let settings = DatabaseSettings::from_env().unwrap();
        assert_eq!(settings.url, "postgres://localhost/auth_test");
        assert_eq!(settings.max_connections, 20);
        assert_eq!(settings.acquire_timeout, 5);

        env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn server_settings_defaults() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let settings = ServerSettings::from_env().unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
    }
}
