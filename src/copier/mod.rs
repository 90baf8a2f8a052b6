//! The graph copier.
//!
//! This module provides:
//! - [`GraphCopier`]: copies a value graph, transforming every string leaf
//! - [`CopyOptions`] / [`IdentityPolicy`]: depth limit and pointer sharing
//! - [`CopyContext`]: per-call state handed to every [`DeepCopy`] impl
//! - [`DeepCopy`] impls for std containers, pointers, cells, scalars and
//!   `serde_json::Value`
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use struct_sanitizer::sanitizer::Suffix;
//! use struct_sanitizer::GraphCopier;
//!
//! let copier = GraphCopier::new(Suffix::new("_updated"));
//!
//! let mut original = HashMap::new();
//! original.insert("k".to_string(), "v".to_string());
//!
//! let copy = copier.copy(&original).unwrap();
//! assert_eq!(copy["k"], "v_updated");
//! assert_eq!(original["k"], "v");
//! ```

mod context;
mod impls;
mod macros;
mod path;
mod shape;

pub use context::CopyContext;
pub use path::{short_type_name, NodePath, Segment};
pub use shape::Shape;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CopyError;
use crate::metrics::CopyReport;
use crate::traits::{DeepCopy, Transform};

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How pointers that share a target are copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Every pointer gets its own copy of the target.
    #[default]
    Independent,
    /// Pointers that share a target in the original share one copied target.
    Preserve,
}

impl FromStr for IdentityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "independent" => Ok(Self::Independent),
            "preserve" => Ok(Self::Preserve),
            other => Err(format!(
                "unknown identity policy '{other}', expected 'independent' or 'preserve'"
            )),
        }
    }
}

impl fmt::Display for IdentityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Independent => f.write_str("independent"),
            Self::Preserve => f.write_str("preserve"),
        }
    }
}

/// Options for a [`GraphCopier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOptions {
    /// Maximum nesting depth; the root is depth 0.
    pub max_depth: usize,
    /// How shared `Rc`/`Arc` targets are copied.
    pub identity: IdentityPolicy,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            identity: IdentityPolicy::default(),
        }
    }
}

impl CopyOptions {
    /// Set the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the identity policy.
    #[must_use]
    pub const fn with_identity(mut self, identity: IdentityPolicy) -> Self {
        self.identity = identity;
        self
    }
}

/// Deep-copies value graphs, passing every string leaf through a
/// [`Transform`].
///
/// The copier holds no per-call state, so one instance can serve concurrent
/// copies when its transform is `Sync`.
#[derive(Clone)]
pub struct GraphCopier<T> {
    transform: T,
    options: CopyOptions,
}

impl<T: Transform> GraphCopier<T> {
    /// Create a copier with default options.
    #[must_use]
    pub fn new(transform: T) -> Self {
        Self::with_options(transform, CopyOptions::default())
    }

    /// Create a copier with explicit options.
    #[must_use]
    pub const fn with_options(transform: T, options: CopyOptions) -> Self {
        Self { transform, options }
    }

    /// The transform applied to string leaves.
    #[must_use]
    pub const fn transform(&self) -> &T {
        &self.transform
    }

    /// The copy options.
    #[must_use]
    pub const fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Copy `original`, transforming every string leaf.
    ///
    /// The result has the same type as the original and shares no storage
    /// with it. The original is only read.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if any node cannot be copied; no partial result
    /// is produced.
    pub fn copy<V: DeepCopy>(&self, original: &V) -> Result<V, CopyError> {
        self.copy_with_report(original).map(|(copy, _)| copy)
    }

    /// Copy `original` and return statistics about the traversal.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if any node cannot be copied.
    pub fn copy_with_report<V: DeepCopy>(
        &self,
        original: &V,
    ) -> Result<(V, CopyReport), CopyError> {
        let started = Instant::now();
        let mut cx = CopyContext::new(&self.transform, &self.options);
        let result = cx.root(original);
        let mut report = cx.into_report();
        report.set_elapsed(started.elapsed());

        match result {
            Ok(copy) => {
                tracing::debug!(
                    type_name = std::any::type_name::<V>(),
                    nodes = report.total_nodes(),
                    strings = report.strings_transformed,
                    changed = report.strings_changed,
                    max_depth = report.max_depth,
                    elapsed_us = report.elapsed_us,
                    "copy complete"
                );
                Ok((copy, report))
            }
            Err(e) => {
                tracing::debug!(
                    type_name = std::any::type_name::<V>(),
                    error = %e,
                    "copy aborted"
                );
                Err(e)
            }
        }
    }
}

impl<T> fmt::Debug for GraphCopier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphCopier")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Copy `original` once with default options.
///
/// # Errors
///
/// Returns [`CopyError`] if any node cannot be copied.
///
/// # Example
///
/// ```
/// use struct_sanitizer::sanitize;
///
/// let copy = sanitize(&Some(Box::new("hi".to_string())), |s: &str| format!("{s}!")).unwrap();
/// assert_eq!(copy.as_deref().map(String::as_str), Some("hi!"));
/// ```
pub fn sanitize<V, T>(original: &V, transform: T) -> Result<V, CopyError>
where
    V: DeepCopy,
    T: Transform,
{
    GraphCopier::new(transform).copy(original)
}
