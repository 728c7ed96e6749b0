//! Secret provisioning.
//!
//! The signing secret (the bot token) comes from a trusted out-of-band
//! source: either the `BOT_TOKEN` environment variable or a token file on
//! disk. It is loaded once at startup and injected into the validator;
//! a missing or empty secret aborts the process rather than letting every
//! verification run against a predictable key. The secret itself is never
//! logged and never appears in error messages.

use std::fs;

use thiserror::Error;

use crate::config::Config;

/// A fault in secret provisioning. None of these are recoverable
/// per-request; the service refuses to start instead.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The token file could not be read.
    #[error("secret file {path} could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The provisioned secret was empty after trimming.
    #[error("provisioned secret is empty")]
    Empty,
    /// The HMAC key schedule rejected the secret. Unreachable for
    /// HMAC-SHA256, which accepts keys of any length.
    #[error("secret rejected by the HMAC key schedule")]
    Rejected,
}

/// Load the signing secret per the configured provisioning source.
///
/// An inline `BOT_TOKEN` wins over the token file. Surrounding whitespace
/// (trailing newlines in particular) is trimmed before use.
pub fn load_secret(config: &Config) -> Result<Vec<u8>, SecretError> {
    let raw = match &config.bot_token {
        Some(token) => token.clone(),
        None => fs::read_to_string(&config.bot_token_file).map_err(|source| {
            SecretError::Unreadable {
                path: config.bot_token_file.clone(),
                source,
            }
        })?,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SecretError::Empty);
    }

    Ok(trimmed.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(token: Option<&str>, file: &str) -> Config {
        Config {
            port: 8080,
            bot_token: token.map(|t| t.to_string()),
            bot_token_file: file.to_string(),
            cors_allow_origins: None,
        }
    }

    #[test]
    fn test_inline_token_wins_over_file() {
        let config = config_with(Some("123456:abc"), "/nonexistent/token.txt");
        assert_eq!(load_secret(&config).unwrap(), b"123456:abc");
    }

    #[test]
    fn test_token_is_trimmed() {
        let config = config_with(Some("  123456:abc\n"), "token.txt");
        assert_eq!(load_secret(&config).unwrap(), b"123456:abc");
    }

    #[test]
    fn test_empty_token_rejected() {
        let config = config_with(Some("   \n"), "token.txt");
        assert!(matches!(load_secret(&config), Err(SecretError::Empty)));
    }

    #[test]
    fn test_missing_file_rejected() {
        let config = config_with(None, "/nonexistent/initgate-token.txt");
        assert!(matches!(
            load_secret(&config),
            Err(SecretError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_token_read_from_file() {
        let path = std::env::temp_dir().join(format!(
            "initgate-secret-test-{}.txt",
            std::process::id()
        ));
        fs::write(&path, "123456:from-file\n").unwrap();

        let config = config_with(None, path.to_str().unwrap());
        assert_eq!(load_secret(&config).unwrap(), b"123456:from-file");

        fs::remove_file(&path).unwrap();
    }
}
