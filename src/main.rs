//! struct-sanitizer binary entry point.
//!
//! Reads one JSON document from stdin, sanitizes every string value and
//! writes the result to stdout. All logs go to stderr.
//!
//! Coverage is excluded because the main function only wires stdio to
//! [`struct_sanitizer::cli::run_json`], which is tested directly.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use struct_sanitizer::cli::run_json;
use struct_sanitizer::config::{Config, LogFormat, DEFAULT_LOG_LEVEL};
use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr only (stdout carries the document).
#[cfg_attr(coverage_nightly, coverage(off))]
fn init_logging(filter: EnvFilter, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() {
    // Loads .env before reading the environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging(EnvFilter::new(DEFAULT_LOG_LEVEL), LogFormat::default());
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Validated by Config::from_env
    let filter = config
        .log_filter()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    init_logging(filter, config.log_format);

    tracing::info!(
        policy = %config.policy,
        max_depth = config.max_depth,
        identity = %config.identity,
        log_format = %config.log_format,
        "struct-sanitizer starting"
    );

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    if let Err(e) = run_json(&config, stdin, stdout) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
