//! Trait definitions for the copy engine.
//!
//! This module defines traits for:
//! - [`DeepCopy`]: Types that can be rebuilt node by node
//! - [`DynCopy`]: Object-safe counterpart for values held behind `dyn`
//! - [`Transform`]: The function applied to every string leaf
//!
//! # Mocking
//!
//! [`Transform`] is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates `MockTransform` for unit tests.
//!
//! # Example
//!
//! ```
//! use struct_sanitizer::{impl_deep_copy, GraphCopier};
//!
//! mod model {
//!     pub struct Comment {
//!         author: String,
//!         body: String,
//!         score: i32,
//!     }
//!
//!     struct_sanitizer::impl_deep_copy!(Comment { author, body, score });
//!
//!     impl Comment {
//!         pub fn new(author: &str, body: &str, score: i32) -> Self {
//!             Self { author: author.into(), body: body.into(), score }
//!         }
//!         pub fn body(&self) -> &str {
//!             &self.body
//!         }
//!     }
//! }
//!
//! let copier = GraphCopier::new(|text: &str| text.to_uppercase());
//! let copy = copier.copy(&model::Comment::new("ann", "hi", 3)).unwrap();
//! assert_eq!(copy.body(), "HI");
//! ```

use std::any::Any;
use std::fmt;

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;

/// A type that can produce a detached copy of itself through a
/// [`CopyContext`].
///
/// Implementations rebuild every field through the context (`cx.field`,
/// `cx.element`, `cx.entry`, `cx.deref`), which tracks the path, enforces the
/// depth limit and routes string leaves through the transform. Because the
/// impl lives next to the type, private fields are reachable without any
/// unsafe access; [`impl_deep_copy!`](crate::impl_deep_copy) generates it.
///
/// Types that do not implement this trait cannot be copied at all, which
/// turns most unsupported shapes into compile errors. Shapes that are only
/// known to be unsupported at runtime return [`CopyError::UnsupportedShape`].
pub trait DeepCopy: Sized {
    /// The structural category of this node.
    fn shape(&self) -> Shape;

    /// Build a copy of `self`, recursing into children through `cx`.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if this node or any descendant cannot be copied.
    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError>;
}

/// Object-safe copy capability for values stored as `Box<dyn DynCopy>`.
///
/// Blanket-implemented for every `DeepCopy + Debug + 'static` type, so any
/// copyable type can be placed behind the trait object.
pub trait DynCopy: Any + fmt::Debug {
    /// Copy the concrete value and re-wrap it in a new box.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the concrete value cannot be copied.
    fn dyn_copy(&self, cx: &mut CopyContext<'_>) -> Result<Box<dyn DynCopy>, CopyError>;

    /// The shape of the concrete value.
    fn dyn_shape(&self) -> Shape;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Full type name of the concrete value.
    fn concrete_type_name(&self) -> &'static str;
}

impl<T> DynCopy for T
where
    T: DeepCopy + Any + fmt::Debug,
{
    fn dyn_copy(&self, cx: &mut CopyContext<'_>) -> Result<Box<dyn DynCopy>, CopyError> {
        let copy = cx.concrete(self)?;
        Ok(Box::new(copy))
    }

    fn dyn_shape(&self) -> Shape {
        self.shape()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn DynCopy {
    /// Returns a reference to the concrete value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns true if the concrete value is of type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// The function applied to every string leaf.
///
/// Must behave as a pure function from the copier's point of view: the same
/// input yields the same output. Closures `Fn(&str) -> String` implement it
/// directly.
#[cfg_attr(test, mockall::automock)]
pub trait Transform: Send + Sync {
    /// Transform one string leaf.
    fn transform(&self, text: &str) -> String;
}

impl<F> Transform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, text: &str) -> String {
        self(text)
    }
}
