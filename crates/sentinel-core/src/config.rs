use crate::app_config::{AppConfig, ElasticCredentials, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SENTINEL_ENV", "development"))?;

    let bind_addr = or_default("SENTINEL_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SENTINEL_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SENTINEL_LOG_LEVEL", "info");

    let elastic_host = require("ELASTIC_HOST")?;
    let elastic_port = parse_u16("ELASTIC_PORT", "9200")?;
    let elastic_scheme = or_default("ELASTIC_SCHEME", "http");
    if elastic_scheme != "http" && elastic_scheme != "https" {
        return Err(invalid(
            "ELASTIC_SCHEME",
            format!("expected http or https, got '{elastic_scheme}'"),
        ));
    }
    let elastic_url = format!(
        "{elastic_scheme}://{}:{elastic_port}",
        elastic_host.trim().trim_end_matches('/')
    );
    let elastic_index = or_default("ELASTIC_INDEX", "sentinel_index");

    let elastic_credentials = match (
        lookup("ELASTIC_USERNAME").ok(),
        lookup("ELASTIC_PASSWORD").ok(),
    ) {
        (Some(username), Some(password)) => Some(ElasticCredentials { username, password }),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("ELASTIC_PASSWORD".into())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("ELASTIC_USERNAME".into())),
    };

    let search_timeout_secs = parse_u64("SENTINEL_SEARCH_TIMEOUT_SECS", "10")?;
    let search_max_retries = parse_u32("SENTINEL_SEARCH_MAX_RETRIES", "2")?;
    let search_retry_backoff_ms = parse_u64("SENTINEL_SEARCH_RETRY_BACKOFF_MS", "250")?;
    let search_max_hits = parse_usize("SENTINEL_SEARCH_MAX_HITS", "1000")?;
    if search_max_hits == 0 {
        return Err(invalid(
            "SENTINEL_SEARCH_MAX_HITS",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        elastic_url,
        elastic_index,
        elastic_credentials,
        search_timeout_secs,
        search_max_retries,
        search_retry_backoff_ms,
        search_max_hits,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTINEL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
