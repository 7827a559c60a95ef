use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEV_API_BASE_URL: &str = "http://localhost:8080";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
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
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PARAMPARE_ENV", "development"));

    // Production builds are served from the backend origin itself.
    let default_base = match env {
        Environment::Production => "",
        Environment::Development | Environment::Test => DEV_API_BASE_URL,
    };
    let api_base_url = parse_api_base_url(&or_default("PARAMPARE_API_URL", default_base))?;

    let log_level = or_default("PARAMPARE_LOG_LEVEL", "info");

    let catalog_request_timeout_secs = parse_u64("PARAMPARE_CATALOG_TIMEOUT_SECS", "20")?;
    let catalog_user_agent = or_default("PARAMPARE_CATALOG_USER_AGENT", "parampare/0.1 (catalog)");
    let catalog_max_retries = parse_u32("PARAMPARE_CATALOG_MAX_RETRIES", "2")?;
    let catalog_retry_backoff_base_secs =
        parse_u64("PARAMPARE_CATALOG_RETRY_BACKOFF_BASE_SECS", "1")?;

    let suggest_debounce_ms = parse_u64("PARAMPARE_SUGGEST_DEBOUNCE_MS", "250")?;
    let suggest_min_query_len = parse_usize("PARAMPARE_SUGGEST_MIN_QUERY_LEN", "2")?;
    let suggest_limit = parse_usize("PARAMPARE_SUGGEST_LIMIT", "8")?;

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        catalog_request_timeout_secs,
        catalog_user_agent,
        catalog_max_retries,
        catalog_retry_backoff_base_secs,
        suggest_debounce_ms,
        suggest_min_query_len,
        suggest_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Validates the API origin and strips trailing slashes.
///
/// Empty is accepted (same-origin); anything else must be an http(s) URL.
fn parse_api_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARAMPARE_API_URL".to_string(),
            reason: format!("expected an http(s) origin, got \"{trimmed}\""),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
