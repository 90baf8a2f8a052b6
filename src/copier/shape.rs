//! Structural categories of copied nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural category of a node in a value graph.
///
/// Every [`DeepCopy`](crate::DeepCopy) implementation reports one of these.
/// The shape decides nothing by itself (each impl owns its copy step) but it
/// labels nodes in traces and in the [`CopyReport`](crate::metrics::CopyReport).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A nullable or owning reference: `Option`, `Box`, `Rc`, `Arc`.
    Pointer,
    /// A value whose concrete type is only known at runtime.
    Dynamic,
    /// A record with a fixed set of named or positional fields.
    Aggregate,
    /// A variable- or fixed-length run of homogeneous elements.
    Sequence,
    /// An associative container; keys are kept, values are traversed.
    Map,
    /// A string leaf. The only shape that goes through the transform.
    Text,
    /// Any other leaf, copied unchanged.
    Scalar,
}

impl Shape {
    /// All shapes, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Pointer,
        Self::Dynamic,
        Self::Aggregate,
        Self::Sequence,
        Self::Map,
        Self::Text,
        Self::Scalar,
    ];

    /// Returns the lowercase name of the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Dynamic => "dynamic",
            Self::Aggregate => "aggregate",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Text => "text",
            Self::Scalar => "scalar",
        }
    }

    /// Returns true for shapes that never recurse.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Text | Self::Scalar)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
