//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed depth limit.
pub const MIN_DEPTH_LIMIT: usize = 1;

/// Maximum allowed depth limit. Deeper graphs would risk the stack of the
/// recursive copy.
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `MAX_DEPTH` must be between 1 and 4096
/// - `LOG_LEVEL` must not be empty and must be a valid log filter
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(MIN_DEPTH_LIMIT..=MAX_DEPTH_LIMIT).contains(&config.max_depth) {
        return Err(ConfigError::InvalidValue {
            var: "MAX_DEPTH".into(),
            reason: format!("must be between {MIN_DEPTH_LIMIT} and {MAX_DEPTH_LIMIT}"),
        });
    }

    if config.log_level.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "LOG_LEVEL".into(),
            reason: "must not be empty".into(),
        });
    }
    config.log_filter()?;

    Ok(())
}
