//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TOKEN_PATH: &str = ".session-client/token.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config parse failed: {var}={value:?} is not a boolean")]
    InvalidBool { var: &'static str, value: String },
    #[error("config parse failed: {var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host of the auth API, without a trailing slash.
    pub base_url: String,
    /// Where the fallback token is persisted.
    pub token_path: PathBuf,
    /// Send the stored fallback token as a bearer credential.
    pub bearer_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            bearer_fallback: true,
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `AUTH_API_BASE_URL`: default `http://localhost:5000`
    /// - `AUTH_TOKEN_PATH`: default `.session-client/token.json`
    /// - `AUTH_BEARER_FALLBACK`: default `true`
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("AUTH_API_BASE_URL") {
            let trimmed = raw.trim().trim_end_matches('/');
            if trimmed.is_empty() {
                return Err(ConfigError::Empty { var: "AUTH_API_BASE_URL" });
            }
            trimmed.clone_into(&mut config.base_url);
        }

        if let Some(raw) = lookup("AUTH_TOKEN_PATH") {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Empty { var: "AUTH_TOKEN_PATH" });
            }
            config.token_path = PathBuf::from(trimmed);
        }

        if let Some(raw) = lookup("AUTH_BEARER_FALLBACK") {
            config.bearer_fallback =
                parse_bool(&raw).ok_or(ConfigError::InvalidBool { var: "AUTH_BEARER_FALLBACK", value: raw })?;
        }

        Ok(config)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
