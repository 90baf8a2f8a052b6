//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (a `.env` file is honored via `dotenvy`)
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use struct_sanitizer::config::{Config, LogFormat};
//! use struct_sanitizer::sanitizer::HtmlPolicy;
//! use struct_sanitizer::IdentityPolicy;
//!
//! // Create a config directly (use Config::from_env() in the binary)
//! let config = Config {
//!     policy: HtmlPolicy::Strict,
//!     max_depth: 64,
//!     identity: IdentityPolicy::Independent,
//!     log_level: "debug".to_string(),
//!     log_format: LogFormat::Text,
//!     pretty: true,
//! };
//!
//! assert_eq!(config.copy_options().max_depth, 64);
//! ```

mod validation;

pub use validation::{validate_config, MAX_DEPTH_LIMIT, MIN_DEPTH_LIMIT};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::copier::{CopyOptions, IdentityPolicy, DEFAULT_MAX_DEPTH};
use crate::error::ConfigError;
use crate::sanitizer::HtmlPolicy;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected 'text' or 'json'")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTML policy applied to every string.
    pub policy: HtmlPolicy,
    /// Maximum nesting depth of the input document.
    pub max_depth: usize,
    /// How shared targets are copied.
    pub identity: IdentityPolicy,
    /// Log filter directive (error, warn, info, debug, trace, or an
    /// `EnvFilter` expression).
    pub log_level: String,
    /// Format of log lines.
    pub log_format: LogFormat,
    /// Pretty-print the output document.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: HtmlPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            identity: IdentityPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
            pretty: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `SANITIZE_POLICY`: `ugc`, `strict`, `escape` or `none` (default: `ugc`)
    /// - `MAX_DEPTH`: Maximum nesting depth (default: `256`)
    /// - `IDENTITY_POLICY`: `independent` or `preserve` (default: `independent`)
    /// - `LOG_LEVEL`: Logging filter (default: `info`)
    /// - `LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `PRETTY`: Pretty-print output, `true` or `false` (default: `false`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - Any variable cannot be parsed
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let config = Self {
            policy: parse_env("SANITIZE_POLICY", HtmlPolicy::default())?,
            max_depth: parse_env("MAX_DEPTH", DEFAULT_MAX_DEPTH)?,
            identity: parse_env("IDENTITY_POLICY", IdentityPolicy::default())?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
            log_format: parse_env("LOG_FORMAT", LogFormat::default())?,
            pretty: parse_env_bool("PRETTY", false)?,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Copy options derived from this configuration.
    #[must_use]
    pub const fn copy_options(&self) -> CopyOptions {
        CopyOptions {
            max_depth: self.max_depth,
            identity: self.identity,
        }
    }

    /// Log filter built from `log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `log_level` is not a valid
    /// `EnvFilter` directive.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(self.log_level.trim()).map_err(|e| ConfigError::InvalidValue {
            var: "LOG_LEVEL".into(),
            reason: e.to_string(),
        })
    }
}

/// Parse an environment variable with `FromStr`, using a default if not set.
fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name).map_or(Ok(default), |val| {
        val.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: name.into(),
            reason: e.to_string(),
        })
    })
}

/// Parse an environment variable as a boolean flag, using a default if not set.
fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                var: name.into(),
                reason: "must be true or false".into(),
            }),
        }
    })
}
