//! Per-call traversal state.

use std::any::{type_name, Any};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::path::{short_type_name, NodePath, Segment};
use super::{CopyOptions, IdentityPolicy};
use crate::error::CopyError;
use crate::metrics::CopyReport;
use crate::traits::{DeepCopy, Transform};

/// State threaded through one copy call.
///
/// `DeepCopy` implementations never recurse into children directly; they go
/// through [`field`](Self::field), [`element`](Self::element),
/// [`entry`](Self::entry), [`deref`](Self::deref) or
/// [`concrete`](Self::concrete), which keep the path current, enforce the
/// depth limit and record the node in the report.
pub struct CopyContext<'a> {
    transform: &'a dyn Transform,
    options: &'a CopyOptions,
    path: NodePath,
    // Addresses of shared targets whose copy is still under construction.
    in_progress: HashSet<usize>,
    // Finished copies of shared targets, keyed by original address.
    shared: HashMap<usize, Box<dyn Any>>,
    report: CopyReport,
}

impl<'a> CopyContext<'a> {
    pub(crate) fn new(transform: &'a dyn Transform, options: &'a CopyOptions) -> Self {
        Self {
            transform,
            options,
            path: NodePath::root(),
            in_progress: HashSet::new(),
            shared: HashMap::new(),
            report: CopyReport::new(),
        }
    }

    /// The path of the node currently being copied.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// The options of the running copy.
    #[must_use]
    pub const fn options(&self) -> &CopyOptions {
        self.options
    }

    /// Pass a string leaf through the transform.
    pub fn text(&mut self, original: &str) -> String {
        let copy = self.transform.transform(original);
        self.report.record_text(original, &copy);
        tracing::trace!(
            path = %self.path,
            before = original.len(),
            after = copy.len(),
            "transformed text leaf"
        );
        copy
    }

    /// Copy a named or positional field of an aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the field cannot be copied.
    pub fn field<T: DeepCopy>(&mut self, name: &'static str, original: &T) -> Result<T, CopyError> {
        self.descend(Segment::Field(name), original)
    }

    /// Copy the element at `index` of a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the element cannot be copied.
    pub fn element<T: DeepCopy>(&mut self, index: usize, original: &T) -> Result<T, CopyError> {
        self.descend(Segment::Index(index), original)
    }

    /// Copy the value stored under `key` in a map. The key itself is not
    /// copied here; maps clone their keys as they are.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the value cannot be copied.
    pub fn entry<K, V>(&mut self, key: &K, original: &V) -> Result<V, CopyError>
    where
        K: fmt::Debug + ?Sized,
        V: DeepCopy,
    {
        self.descend(Segment::Key(format!("{key:?}")), original)
    }

    /// Copy the target of a pointer or cell.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the target cannot be copied.
    pub fn deref<T: DeepCopy>(&mut self, original: &T) -> Result<T, CopyError> {
        self.descend(Segment::Deref, original)
    }

    /// Copy the concrete value behind a dynamic holder.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the concrete value cannot be copied.
    pub fn concrete<T: DeepCopy>(&mut self, original: &T) -> Result<T, CopyError> {
        self.descend(Segment::Concrete(type_name::<T>()), original)
    }

    /// Copy a shared target (the referent of an `Rc` or `Arc`) exactly once
    /// per path.
    ///
    /// `address` identifies the original target. Reaching it again while its
    /// copy is still being built is a cycle. Under
    /// [`IdentityPolicy::Preserve`] a finished copy is remembered and handed
    /// out again for every later pointer to the same target.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::CycleDetected`] on a back-reference, or whatever
    /// `build` returns.
    pub fn shared<P, F>(&mut self, address: usize, build: F) -> Result<P, CopyError>
    where
        P: Clone + 'static,
        F: FnOnce(&mut Self) -> Result<P, CopyError>,
    {
        let preserve = self.options.identity == IdentityPolicy::Preserve;

        if preserve {
            if let Some(existing) = self
                .shared
                .get(&address)
                .and_then(|copy| copy.downcast_ref::<P>())
            {
                self.report.record_shared_reuse();
                tracing::trace!(path = %self.path, address, "reusing shared copy");
                return Ok(existing.clone());
            }
        }

        if !self.in_progress.insert(address) {
            tracing::debug!(path = %self.path, address, "back-reference found");
            return Err(CopyError::CycleDetected {
                type_name: short_type_name(type_name::<P>()),
                path: self.path.to_string(),
            });
        }

        let result = build(self);
        self.in_progress.remove(&address);
        let copy = result?;

        if preserve {
            self.shared.insert(address, Box::new(copy.clone()));
        }
        Ok(copy)
    }

    /// Build an [`CopyError::UnsupportedShape`] for type `T` at the current
    /// path.
    #[must_use]
    pub fn unsupported<T: ?Sized>(&self) -> CopyError {
        CopyError::UnsupportedShape {
            type_name: short_type_name(type_name::<T>()),
            path: self.path.to_string(),
        }
    }

    /// Build an [`CopyError::InaccessibleField`] for type `T` at the current
    /// path.
    #[must_use]
    pub fn inaccessible<T: ?Sized>(&self, reason: impl Into<String>) -> CopyError {
        CopyError::InaccessibleField {
            type_name: short_type_name(type_name::<T>()),
            path: self.path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn root<T: DeepCopy>(&mut self, original: &T) -> Result<T, CopyError> {
        self.visit(original)
    }

    pub(crate) fn into_report(self) -> CopyReport {
        self.report
    }

    fn descend<T: DeepCopy>(&mut self, segment: Segment, original: &T) -> Result<T, CopyError> {
        self.path.push(segment);
        let result = self.visit(original);
        self.path.pop();
        result
    }

    fn visit<T: DeepCopy>(&mut self, original: &T) -> Result<T, CopyError> {
        let depth = self.path.depth();
        if depth > self.options.max_depth {
            return Err(CopyError::DepthExceeded {
                limit: self.options.max_depth,
                path: self.path.to_string(),
            });
        }

        let shape = original.shape();
        self.report.record_node(shape, depth);
        tracing::trace!(path = %self.path, %shape, type_name = type_name::<T>(), "copying node");

        original.deep_copy(self)
    }
}

impl fmt::Debug for CopyContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyContext")
            .field("path", &self.path.to_string())
            .field("options", &self.options)
            .field("in_progress", &self.in_progress.len())
            .field("shared", &self.shared.len())
            .finish_non_exhaustive()
    }
}
