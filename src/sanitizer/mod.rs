//! Ready-made string transforms.
//!
//! This module provides:
//! - [`Identity`]: returns every string unchanged
//! - [`Suffix`]: appends a fixed suffix, useful to see which strings a copy
//!   reached
//! - [`HtmlSanitizer`]: regex-based HTML cleaning with an [`HtmlPolicy`]
//!
//! Any `Fn(&str) -> String + Send + Sync` closure is also a
//! [`Transform`](crate::Transform).

mod html;

pub use html::{HtmlPolicy, HtmlSanitizer};

use crate::traits::Transform;

/// Returns the text unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Transform for Identity {
    fn transform(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Appends a fixed suffix to every string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffix {
    suffix: String,
}

impl Suffix {
    /// Create a transform appending `suffix`.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The appended text.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Transform for Suffix {
    fn transform(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.suffix.len());
        out.push_str(text);
        out.push_str(&self.suffix);
        out
    }
}
