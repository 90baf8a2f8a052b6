//! Struct Sanitizer
//!
//! Deep-copies arbitrary value graphs while passing every string leaf through
//! a caller-supplied transform, typically an HTML sanitizer. The original is
//! never modified and the copy shares no storage with it.
//!
//! # Features
//!
//! - Copies through structs (private fields included), enums, tuples,
//!   `Option`, `Box`, `Rc`/`Arc`, cells and locks, sequences, maps and
//!   `Box<dyn DynCopy>` values
//! - Opt-in field visitors via [`impl_deep_copy!`], no unsafe code
//! - Cycle detection and a nesting limit, reported with the path of the
//!   failing node
//! - Optional preservation of shared `Rc`/`Arc` targets
//! - Regex-based HTML sanitizer with UGC, strict and escape policies
//!
//! # Quick Start
//!
//! ```
//! use struct_sanitizer::sanitizer::{HtmlPolicy, HtmlSanitizer};
//! use struct_sanitizer::{impl_deep_copy, GraphCopier};
//!
//! struct Post {
//!     title: String,
//!     tags: Vec<String>,
//!     likes: u32,
//! }
//!
//! impl_deep_copy!(Post { title, tags, likes });
//!
//! let post = Post {
//!     title: "<b>Hi</b><script>steal()</script>".into(),
//!     tags: vec!["<i onclick=\"x()\">rust</i>".into()],
//!     likes: 3,
//! };
//!
//! let copier = GraphCopier::new(HtmlSanitizer::new(HtmlPolicy::Ugc));
//! let clean = copier.copy(&post).unwrap();
//!
//! assert_eq!(clean.title, "<b>Hi</b>");
//! assert_eq!(clean.tags, vec!["<i>rust</i>"]);
//! assert_eq!(clean.likes, 3);
//! assert_eq!(post.title, "<b>Hi</b><script>steal()</script>");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  &T   ┌─────────────┐  &str   ┌───────────┐
//! │ original │──────▶│ GraphCopier │────────▶│ Transform │
//! └──────────┘       │ CopyContext │◀────────│           │
//!                    └──────┬──────┘ String  └───────────┘
//!                           │ T
//!                           ▼
//!                      detached copy + CopyReport
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod copier;
pub mod error;
pub mod metrics;
pub mod sanitizer;
pub mod traits;

pub use copier::{
    sanitize, CopyContext, CopyOptions, GraphCopier, IdentityPolicy, NodePath, Segment, Shape,
    DEFAULT_MAX_DEPTH,
};
pub use error::CopyError;
pub use metrics::CopyReport;
pub use traits::{DeepCopy, DynCopy, Transform};

#[cfg(test)]
mod test_utils;
