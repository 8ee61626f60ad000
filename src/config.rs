// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use chrono::FixedOffset;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recommendation service
    pub recommend_api_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JSON file holding the session's initial profile
    pub seed_profile_path: String,
    /// Session timezone as a fixed offset from UTC; `None` = host local offset
    pub utc_offset: Option<FixedOffset>,
    /// Timeout for one recommendation request
    pub recommend_timeout_secs: u64,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            recommend_api_url: "http://127.0.0.1:9".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            seed_profile_path: "data/profile.json".to_string(),
            utc_offset: FixedOffset::east_opt(0),
            recommend_timeout_secs: 2,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let utc_offset = match env::var("UTC_OFFSET_MINUTES") {
            Ok(raw) => Some(parse_utc_offset(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            recommend_api_url: required_var("RECOMMEND_API_URL")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            seed_profile_path: env::var("SEED_PROFILE_PATH")
                .unwrap_or_else(|_| "data/profile.json".to_string()),
            utc_offset,
            recommend_timeout_secs: env::var("RECOMMEND_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

/// Read a variable that must be set to something other than whitespace.
fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Parse a signed offset in minutes east of UTC (e.g. `-420` for PDT).
fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(60))
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ConfigError::Invalid("UTC_OFFSET_MINUTES", raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
