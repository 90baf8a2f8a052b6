use std::ffi::OsString;
use std::num::{
    NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::time::{Duration, Instant, SystemTime};

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;
use crate::traits::DeepCopy;

macro_rules! impl_copy_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepCopy for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn deep_copy(&self, _cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
                    Ok(*self)
                }
            }
        )*
    };
}

impl_copy_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
    Duration, Instant, SystemTime,
    NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize,
);

// Paths are identifiers, not prose, so they bypass the transform.
macro_rules! impl_clone_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepCopy for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn deep_copy(&self, _cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

impl_clone_scalar!(PathBuf, OsString);

impl<T: ?Sized> DeepCopy for *const T {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Err(cx.unsupported::<Self>())
    }
}

impl<T: ?Sized> DeepCopy for *mut T {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Err(cx.unsupported::<Self>())
    }
}

// A copied channel endpoint would either alias the original channel or be
// disconnected from it; neither is a copy.
macro_rules! impl_unsupported_channel {
    ($($ty:ident),*) => {
        $(
            impl<T> DeepCopy for $ty<T> {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
                    Err(cx.unsupported::<Self>())
                }
            }
        )*
    };
}

impl_unsupported_channel!(Sender, SyncSender, Receiver);
