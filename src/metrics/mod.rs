//! Copy metrics.
//!
//! This module provides:
//! - Per-shape node counts for a single copy
//! - String statistics (transformed vs. actually changed)
//! - Identity-sharing reuse counts
//! - Elapsed time
//!
//! # Example
//!
//! ```
//! use struct_sanitizer::sanitizer::Suffix;
//! use struct_sanitizer::{GraphCopier, Shape};
//!
//! let copier = GraphCopier::new(Suffix::new("_updated"));
//! let (copy, report) = copier
//!     .copy_with_report(&vec!["a".to_string(), "b".to_string()])
//!     .unwrap();
//!
//! assert_eq!(copy, vec!["a_updated", "b_updated"]);
//! assert_eq!(report.count(Shape::Sequence), 1);
//! assert_eq!(report.count(Shape::Text), 2);
//! assert_eq!(report.strings_changed, 2);
//! ```

// Durations above u64::MAX microseconds are not a concern here
#![allow(clippy::cast_possible_truncation)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::copier::Shape;

/// Statistics gathered while copying one value graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReport {
    /// Nodes visited, per shape.
    pub nodes: BTreeMap<Shape, usize>,
    /// Deepest nesting level reached (the root is depth 0).
    pub max_depth: usize,
    /// String leaves passed through the transform.
    pub strings_transformed: usize,
    /// String leaves whose content differs after the transform.
    pub strings_changed: usize,
    /// Shared targets reused instead of copied again.
    pub shared_reused: usize,
    /// Wall-clock time of the copy in microseconds.
    pub elapsed_us: u64,
}

impl CopyReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes of the given shape.
    #[must_use]
    pub fn count(&self, shape: Shape) -> usize {
        self.nodes.get(&shape).copied().unwrap_or(0)
    }

    /// Total number of nodes visited.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.nodes.values().sum()
    }

    pub(crate) fn record_node(&mut self, shape: Shape, depth: usize) {
        *self.nodes.entry(shape).or_insert(0) += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub(crate) fn record_text(&mut self, before: &str, after: &str) {
        self.strings_transformed += 1;
        if before != after {
            self.strings_changed += 1;
        }
    }

    pub(crate) fn record_shared_reuse(&mut self) {
        self.shared_reused += 1;
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_us = elapsed.as_micros() as u64;
    }
}
