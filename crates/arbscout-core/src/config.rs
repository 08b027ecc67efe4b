use crate::app_config::{
    AppConfig, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_AMAZON_BASE_URL, DEFAULT_USER_AGENT,
    DEFAULT_WHOLESALE_BASE_URL,
};
use crate::listing::NamePrecedence;
use crate::profit::ProfitConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can drive it
/// from a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be greater than 0".to_string()));
        }
        Ok(value)
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    // Money and percentage values: finite and non-negative.
    let parse_amount = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                var,
                format!("expected a finite non-negative number, got {raw}"),
            ));
        }
        Ok(value)
    };

    let base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(invalid(var, format!("expected an http(s) URL, got {raw}")));
        }
        Ok(trimmed.to_string())
    };

    let log_level = or_default("ARBSCOUT_LOG_LEVEL", "info");
    let input_path = PathBuf::from(or_default("ARBSCOUT_INPUT_PATH", "asins.csv"));
    let output_path = PathBuf::from(or_default("ARBSCOUT_OUTPUT_PATH", "arbitrage.csv"));

    let amazon_base_url = base_url("ARBSCOUT_AMAZON_BASE_URL", DEFAULT_AMAZON_BASE_URL)?;
    let wholesale_base_url = base_url("ARBSCOUT_WHOLESALE_BASE_URL", DEFAULT_WHOLESALE_BASE_URL)?;

    let scraper_request_timeout_secs = parse_positive_u64("ARBSCOUT_SCRAPER_REQUEST_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("ARBSCOUT_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_accept_language =
        or_default("ARBSCOUT_SCRAPER_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);
    let scraper_max_concurrent = parse_usize("ARBSCOUT_SCRAPER_MAX_CONCURRENT", "1")?.max(1);
    let scraper_inter_request_delay_ms = parse_u64("ARBSCOUT_SCRAPER_INTER_REQUEST_DELAY_MS", "0")?;

    let name_precedence = parse_name_precedence(&or_default("ARBSCOUT_NAME_PRECEDENCE", "wholesale"))?;

    let profit = ProfitConfig {
        sourcing_cost: parse_amount("ARBSCOUT_SOURCING_COST", "3.50")?,
        fulfillment_fee: parse_amount("ARBSCOUT_FULFILLMENT_FEE", "3.55")?,
        min_roi_percent: parse_amount("ARBSCOUT_MIN_ROI_PERCENT", "50")?,
    };

    Ok(AppConfig {
        log_level,
        input_path,
        output_path,
        amazon_base_url,
        wholesale_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_accept_language,
        scraper_max_concurrent,
        scraper_inter_request_delay_ms,
        name_precedence,
        profit,
    })
}

/// Parse a string into a `NamePrecedence` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `wholesale` or `amazon` (case-insensitive).
fn parse_name_precedence(s: &str) -> Result<NamePrecedence, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "wholesale" => Ok(NamePrecedence::Wholesale),
        "amazon" => Ok(NamePrecedence::Amazon),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ARBSCOUT_NAME_PRECEDENCE".to_string(),
            reason: format!("unknown precedence '{other}', expected 'wholesale' or 'amazon'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
