use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
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

    let database_url = optional("DATABASE_URL");
    let env = parse_environment(&or_default("SOCIALPULSE_ENV", "development"))?;
    let bind_addr = parse_addr("SOCIALPULSE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("SOCIALPULSE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SOCIALPULSE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SOCIALPULSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SOCIALPULSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let profile_base_url = or_default("SOCIALPULSE_PROFILE_BASE_URL", "https://x.com")
        .trim_end_matches('/')
        .to_string();
    if !profile_base_url.starts_with("http://") && !profile_base_url.starts_with("https://") {
        return Err(invalid(
            "SOCIALPULSE_PROFILE_BASE_URL",
            format!("expected an http(s) URL, got \"{profile_base_url}\""),
        ));
    }

    let browser_executable = optional("SOCIALPULSE_BROWSER_EXECUTABLE").map(PathBuf::from);
    let browser_user_agent =
        or_default("SOCIALPULSE_BROWSER_USER_AGENT", DEFAULT_BROWSER_USER_AGENT);

    let scraper_wait_timeout_secs = parse_u64("SOCIALPULSE_SCRAPER_WAIT_TIMEOUT_SECS", "10")?;
    if scraper_wait_timeout_secs == 0 {
        return Err(invalid(
            "SOCIALPULSE_SCRAPER_WAIT_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let max_concurrent_sessions = parse_usize("SOCIALPULSE_MAX_CONCURRENT_SESSIONS", "2")?;
    if max_concurrent_sessions == 0 {
        return Err(invalid(
            "SOCIALPULSE_MAX_CONCURRENT_SESSIONS",
            "must be at least 1".to_string(),
        ));
    }

    let request_deadline_secs = parse_u64("SOCIALPULSE_REQUEST_DEADLINE_SECS", "60")?;
    let lexicon_path = optional("SOCIALPULSE_LEXICON_PATH").map(PathBuf::from);

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        profile_base_url,
        browser_executable,
        browser_user_agent,
        scraper_wait_timeout_secs,
        max_concurrent_sessions,
        request_deadline_secs,
        lexicon_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALPULSE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
