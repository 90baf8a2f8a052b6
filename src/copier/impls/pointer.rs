use std::cell::{Cell, RefCell};
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, RwLock, TryLockError};

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;
use crate::traits::DeepCopy;

impl<T: DeepCopy> DeepCopy for Option<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        match self {
            None => Ok(None),
            Some(target) => cx.deref(target).map(Some),
        }
    }
}

impl<T: DeepCopy> DeepCopy for Box<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        cx.deref(&**self).map(Box::new)
    }
}

impl<T: DeepCopy + 'static> DeepCopy for Rc<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let address = Rc::as_ptr(self).cast::<()>() as usize;
        cx.shared(address, |cx| cx.deref(&**self).map(Rc::new))
    }
}

impl<T: DeepCopy + 'static> DeepCopy for Arc<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let address = Arc::as_ptr(self).cast::<()>() as usize;
        cx.shared(address, |cx| cx.deref(&**self).map(Arc::new))
    }
}

// A weak back-reference can only be copied by re-linking it to a copy that
// is still under construction, which the copier does not do.
impl<T> DeepCopy for rc::Weak<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Err(cx.unsupported::<Self>())
    }
}

impl<T> DeepCopy for sync::Weak<T> {
    fn shape(&self) -> Shape {
        Shape::Pointer
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Err(cx.unsupported::<Self>())
    }
}

impl<T: DeepCopy> DeepCopy for RefCell<T> {
    fn shape(&self) -> Shape {
        Shape::Aggregate
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let inner = self
            .try_borrow()
            .map_err(|_| cx.inaccessible::<Self>("value is mutably borrowed"))?;
        cx.deref(&*inner).map(Self::new)
    }
}

impl<T: DeepCopy + Copy> DeepCopy for Cell<T> {
    fn shape(&self) -> Shape {
        Shape::Aggregate
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        cx.deref(&self.get()).map(Self::new)
    }
}

impl<T: DeepCopy> DeepCopy for Mutex<T> {
    fn shape(&self) -> Shape {
        Shape::Aggregate
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let guard = match self.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(_)) => {
                return Err(cx.inaccessible::<Self>("mutex is poisoned"))
            }
            Err(TryLockError::WouldBlock) => {
                return Err(cx.inaccessible::<Self>("mutex is locked"))
            }
        };
        cx.deref(&*guard).map(Self::new)
    }
}

impl<T: DeepCopy> DeepCopy for RwLock<T> {
    fn shape(&self) -> Shape {
        Shape::Aggregate
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let guard = match self.try_read() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(_)) => {
                return Err(cx.inaccessible::<Self>("lock is poisoned"))
            }
            Err(TryLockError::WouldBlock) => {
                return Err(cx.inaccessible::<Self>("lock is held for writing"))
            }
        };
        cx.deref(&*guard).map(Self::new)
    }
}
