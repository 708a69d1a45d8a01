use std::path::PathBuf;

use crate::app_config::AnalysisConfig;
use crate::ConfigError;

/// Load analysis configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AnalysisConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load analysis configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AnalysisConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build analysis configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones fall back to
/// [`AnalysisConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AnalysisConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AnalysisConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let spike_multiplier = match lookup("CRISISDESK_SPIKE_MULTIPLIER") {
        Ok(raw) => parse_multiplier(&raw)
            .map_err(|reason| invalid("CRISISDESK_SPIKE_MULTIPLIER", reason))?,
        Err(_) => defaults.spike_multiplier,
    };

    let top_sources = match lookup("CRISISDESK_TOP_SOURCES") {
        Ok(raw) => {
            let n = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid("CRISISDESK_TOP_SOURCES", e.to_string()))?;
            if n == 0 {
                return Err(invalid(
                    "CRISISDESK_TOP_SOURCES",
                    "must be at least 1".to_string(),
                ));
            }
            n
        }
        Err(_) => defaults.top_sources,
    };

    let csv_delimiter = match lookup("CRISISDESK_CSV_DELIMITER") {
        Ok(raw) => {
            parse_delimiter(&raw).map_err(|reason| invalid("CRISISDESK_CSV_DELIMITER", reason))?
        }
        Err(_) => defaults.csv_delimiter,
    };

    let crises_path = lookup("CRISISDESK_CRISES_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.crises_path);

    Ok(AnalysisConfig {
        spike_multiplier,
        top_sources,
        csv_delimiter,
        crises_path,
    })
}

fn parse_multiplier(raw: &str) -> Result<f64, String> {
    let value = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("must be a finite number above zero, got {value}"));
    }
    Ok(value)
}

/// `\t` is accepted as an escape for a tab, since literal tabs are easy to lose
/// in `.env` files.
fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw == "\\t" {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [b] if b.is_ascii() && !b.is_ascii_alphanumeric() && *b != b'"' => Ok(*b),
        _ => Err(format!(
            "expected a single ASCII punctuation or whitespace character, got {raw:?}"
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
