use anyhow::{Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

/// Longest product description forwarded to the model, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8000;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub max_input_chars: usize,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_input_chars: parse_env("MAX_INPUT_CHARS", DEFAULT_MAX_INPUT_CHARS)
                .context("MAX_INPUT_CHARS must be a positive integer")?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 30)
                .context("LLM_TIMEOUT_SECS must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("ECOSCAN_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("ECOSCAN_TEST_BAD_LIMIT", "lots");
        let result: Result<usize> = parse_env("ECOSCAN_TEST_BAD_LIMIT", 10);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_trims_value() {
        std::env::set_var("ECOSCAN_TEST_TIMEOUT", " 45 ");
        let secs: u64 = parse_env("ECOSCAN_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(secs, 45);
    }
}
