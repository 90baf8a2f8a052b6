//! Error types for struct-sanitizer.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level errors returned by the binary
//! - [`CopyError`]: Failures raised while copying a value graph
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` so a failed copy can cross threads.

use thiserror::Error;

/// Top-level application error.
///
/// Wraps all subsystem errors for unified handling in the binary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Copy error.
    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading input or writing output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },

    /// The input document is not valid JSON.
    #[error("JSON error: {message}")]
    Json {
        /// Description of the parse failure.
        message: String,
    },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        // Reader and writer failures surface through serde_json too.
        if err.is_io() {
            return std::io::Error::from(err).into();
        }
        Self::Json {
            message: err.to_string(),
        }
    }
}

/// Copy errors.
///
/// Every variant carries the rendered path of the node that failed, so the
/// caller can tell which part of the graph aborted the copy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// The node's type cannot be copied at all.
    #[error("Unsupported shape {type_name} at {path}")]
    UnsupportedShape {
        /// Type name of the offending node.
        type_name: String,
        /// Path from the root to the node.
        path: String,
    },

    /// The node exists but its contents cannot be read.
    #[error("Inaccessible field {type_name} at {path}: {reason}")]
    InaccessibleField {
        /// Type name of the offending node.
        type_name: String,
        /// Path from the root to the node.
        path: String,
        /// Why the contents are not readable.
        reason: String,
    },

    /// A shared target was reached again while it was still being copied.
    #[error("Cycle detected through {type_name} at {path}")]
    CycleDetected {
        /// Type name of the pointer that closes the cycle.
        type_name: String,
        /// Path from the root to the pointer.
        path: String,
    },

    /// The graph is nested deeper than the configured limit.
    #[error("Maximum depth {limit} exceeded at {path}")]
    DepthExceeded {
        /// The configured depth limit.
        limit: usize,
        /// Path from the root to the first node past the limit.
        path: String,
    },
}

impl CopyError {
    /// Returns the path of the node that failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::UnsupportedShape { path, .. }
            | Self::InaccessibleField { path, .. }
            | Self::CycleDetected { path, .. }
            | Self::DepthExceeded { path, .. } => path,
        }
    }

    /// Returns true if the failure comes from the shape of the graph rather
    /// than from the types in it.
    ///
    /// Cycles and excessive depth depend on the particular value; unsupported
    /// and inaccessible nodes would fail for any value of the same type.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::CycleDetected { .. } | Self::DepthExceeded { .. })
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
