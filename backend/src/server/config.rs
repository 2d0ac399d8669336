//! Environment-driven application configuration.

use std::net::SocketAddr;

/// Bind address applied when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Pool size applied when `DATABASE_POOL_SIZE` is unset.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Configuration errors raised at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("BIND_ADDR is not a valid socket address: {value}")]
    InvalidBindAddr { value: String },
    #[error("DATABASE_POOL_SIZE must be a positive integer: {value}")]
    InvalidPoolSize { value: String },
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// `DATABASE_URL` is required; `BIND_ADDR` defaults to `0.0.0.0:8080`
    /// and `DATABASE_POOL_SIZE` to 10.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let pool_size = std::env::var("DATABASE_POOL_SIZE").ok();
        Self::resolve(database_url, &bind_addr, pool_size.as_deref())
    }

    fn resolve(
        database_url: String,
        bind_addr: &str,
        pool_size: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let bind_addr: SocketAddr =
            bind_addr
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    value: bind_addr.to_owned(),
                })?;

        let pool_size = match pool_size {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(ConfigError::InvalidPoolSize {
                        value: raw.to_owned(),
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
        })
    }
}
