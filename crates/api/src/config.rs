//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotwise API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `RATE_LIMIT_MAX_REQUESTS`: Requests allowed per client and window (default: 100)
//! - `RATE_LIMIT_WINDOW_SECONDS`: Length of the rate limit window (default: 900)
//! - `RATE_LIMIT_TRUST_FORWARDED`: Key clients by `X-Forwarded-For`; only enable
//!   behind a proxy that overwrites the header (default: false)
//! - `WIDGET_BASE_URL`: Public URL of the booking pages the widget embeds (required)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the Slotwise API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotwise_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Maximum requests per client within one rate limit window
    pub rate_limit_max_requests: u32,

    /// Rate limit window in seconds
    pub rate_limit_window: u64,

    /// Whether the rate limiter keys clients by `X-Forwarded-For`
    pub rate_limit_trust_forwarded: bool,

    /// Base URL the embed widget loads booking pages from
    pub widget_base_url: String,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The WIDGET_BASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The request timeout or a rate limit value is set but is not a positive integer
    /// - RATE_LIMIT_TRUST_FORWARDED is set but is not a boolean
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = parse_positive(
            "API_REQUEST_TIMEOUT_SECONDS",
            env::var("API_REQUEST_TIMEOUT_SECONDS").ok().as_deref(),
            30,
        )?;

        // Rate limiting
        let rate_limit_max_requests = parse_positive(
            "RATE_LIMIT_MAX_REQUESTS",
            env::var("RATE_LIMIT_MAX_REQUESTS").ok().as_deref(),
            100,
        )?;
        let rate_limit_window = parse_positive(
            "RATE_LIMIT_WINDOW_SECONDS",
            env::var("RATE_LIMIT_WINDOW_SECONDS").ok().as_deref(),
            900,
        )?;
        let rate_limit_trust_forwarded = parse_flag(
            "RATE_LIMIT_TRUST_FORWARDED",
            env::var("RATE_LIMIT_TRUST_FORWARDED").ok().as_deref(),
        )?;

        // Widget settings
        let widget_base_url = env::var("WIDGET_BASE_URL")
            .wrap_err("WIDGET_BASE_URL environment variable must be set")?;

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            rate_limit_max_requests,
            rate_limit_window,
            rate_limit_trust_forwarded,
            widget_base_url,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Parses an optional setting that must be greater than zero.
fn parse_positive<T>(name: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| eyre::eyre!("Invalid {} value: '{}'", name, raw))?;
    if value <= T::default() {
        return Err(eyre::eyre!("{} must be greater than zero", name));
    }
    Ok(value)
}

/// Parses an optional boolean setting, defaulting to false.
fn parse_flag(name: &str, raw: Option<&str>) -> Result<bool> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(eyre::eyre!("Invalid {} value: '{}'", name, other)),
    }
}
