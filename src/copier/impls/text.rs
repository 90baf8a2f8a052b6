use std::borrow::Cow;

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;
use crate::traits::DeepCopy;

impl DeepCopy for String {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Ok(cx.text(self))
    }
}

impl DeepCopy for Box<str> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Ok(cx.text(self).into_boxed_str())
    }
}

impl DeepCopy for Cow<'_, str> {
    fn shape(&self) -> Shape {
        Shape::Text
    }

    // Always owned, even when the original borrows.
    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Ok(Cow::Owned(cx.text(self)))
    }
}
