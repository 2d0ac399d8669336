//! Server assembly: configuration and adapter wiring.

pub mod config;

pub use config::{AppConfig, ConfigError};
