//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables, with defaults that
//! run out of the box (port 8080, `token.txt` next to the process,
//! permissive CORS).

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Inline bot token; takes precedence over the token file
    pub bot_token: Option<String>,

    /// Path to the provisioned bot token file
    pub bot_token_file: String,

    /// Optional list of allowed CORS origins; `None` allows any origin
    pub cors_allow_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            bot_token: env::var("BOT_TOKEN").ok(),

            bot_token_file: env::var("BOT_TOKEN_FILE")
                .unwrap_or_else(|_| "token.txt".to_string()),

            cors_allow_origins: parse_csv("CORS_ALLOW_ORIGINS"),
        }
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        env::set_var("TEST_ORIGINS", "https://a.example, https://b.example");
        let result = parse_csv("TEST_ORIGINS");
        assert_eq!(
            result,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        env::remove_var("TEST_ORIGINS");
    }

    #[test]
    fn test_parse_csv_missing() {
        assert_eq!(parse_csv("NONEXISTENT_ORIGINS"), None);
    }

    #[test]
    fn test_parse_csv_skips_empty_entries() {
        env::set_var("TEST_ORIGINS_EMPTY", "https://a.example,, ");
        let result = parse_csv("TEST_ORIGINS_EMPTY");
        assert_eq!(result, Some(vec!["https://a.example".to_string()]));
        env::remove_var("TEST_ORIGINS_EMPTY");
    }
}
