// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! The API base URL is the only required setting; everything else has a
//! sensible default for local use.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of attempts for retried read endpoints.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
/// Upper bound accepted for `ATIVVO_RETRY_ATTEMPTS`.
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
/// Default delay before the first retry, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
/// Default location of the cached session.
pub const DEFAULT_SESSION_PATH: &str = ".ativvo/session.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ativvo REST API (no trailing slash)
    pub api_url: String,
    /// Where the session (token + cached user) is kept
    pub session_path: PathBuf,
    /// Attempts for the retried read endpoints
    pub retry_attempts: u32,
    /// Delay before the first retry; grows by 1.5x per attempt
    pub retry_delay: Duration,
    /// Optional per-request timeout (reqwest default when unset)
    pub http_timeout: Option<Duration>,
}

impl Config {
    /// Config for tests only, pointed at the given API URL.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            session_path: PathBuf::from("target/test-session.json"),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: Duration::from_millis(1),
            http_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Fails fast when `ATIVVO_API_URL` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("ATIVVO_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("ATIVVO_API_URL"))?;
        if api_url.is_empty() {
            return Err(ConfigError::Missing("ATIVVO_API_URL"));
        }

        let retry_attempts = parse_var("ATIVVO_RETRY_ATTEMPTS")?.unwrap_or(DEFAULT_RETRY_ATTEMPTS);
        if !(1..=MAX_RETRY_ATTEMPTS).contains(&retry_attempts) {
            return Err(ConfigError::Invalid(
                "ATIVVO_RETRY_ATTEMPTS",
                retry_attempts.to_string(),
            ));
        }

        Ok(Self {
            api_url,
            session_path: env::var("ATIVVO_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_PATH)),
            retry_attempts,
            retry_delay: Duration::from_millis(
                parse_var("ATIVVO_RETRY_DELAY_MS")?.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            ),
            http_timeout: parse_var::<u64>("ATIVVO_HTTP_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
