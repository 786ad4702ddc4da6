//! Shared domain types and configuration for the sentinel analytics service.

pub mod app_config;
pub mod config;
pub mod mention;
pub mod window;

use thiserror::Error;

pub use app_config::{AppConfig, ElasticCredentials, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use mention::{Mention, Sentiment};
pub use window::DateWindow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("end date {end} must be after start date {start}")]
    EmptyWindow { start: String, end: String },

    #[error("window starting {start} has no representable prior window")]
    WindowOutOfRange { start: String },

    #[error("unknown sentiment label: {0}")]
    UnknownSentiment(String),
}
