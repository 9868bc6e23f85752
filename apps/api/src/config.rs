use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default so the mock backend starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Fixed artificial delay applied by every mock handler.
    pub mock_latency_ms: u64,
    /// Probability that a mutation handler answers with a synthetic 500.
    pub mock_failure_rate: f64,
    /// Probability that the jobs view fails a reorder before sending it.
    pub reorder_failure_rate: f64,
    /// JSON file backing the persisted role flag. In-memory when unset.
    pub session_store_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite::memory:"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            mock_latency_ms: env_or("MOCK_LATENCY_MS", "300")
                .parse::<u64>()
                .context("MOCK_LATENCY_MS must be a whole number of milliseconds")?,
            mock_failure_rate: parse_rate("MOCK_FAILURE_RATE", "0.1")?,
            reorder_failure_rate: parse_rate("REORDER_FAILURE_RATE", "0.1")?,
            session_store_path: std::env::var("SESSION_STORE_PATH").ok().map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            mock_latency_ms: 300,
            mock_failure_rate: 0.1,
            reorder_failure_rate: 0.1,
            session_store_path: None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_rate(key: &str, default: &str) -> Result<f64> {
    let rate = env_or(key, default)
        .parse::<f64>()
        .with_context(|| format!("{key} must be a number between 0 and 1"))?;
    anyhow::ensure!(
        (0.0..=1.0).contains(&rate),
        "{key} must be between 0 and 1, got {rate}"
    );
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_match_observed_behavior() {
        let config = Config::default();
        assert_eq!(config.reorder_failure_rate, 0.1);
        assert_eq!(config.mock_failure_rate, 0.1);
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_parse_rate_rejects_out_of_range() {
        std::env::set_var("TALENTFLOW_TEST_RATE", "1.5");
        assert!(parse_rate("TALENTFLOW_TEST_RATE", "0.1").is_err());
        std::env::remove_var("TALENTFLOW_TEST_RATE");
        assert_eq!(parse_rate("TALENTFLOW_TEST_RATE", "0.25").unwrap(), 0.25);
    }
}
