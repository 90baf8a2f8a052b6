use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;
use crate::traits::DeepCopy;

impl<T: DeepCopy> DeepCopy for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut copy = Self::with_capacity(self.len());
        for (index, item) in self.iter().enumerate() {
            copy.push(cx.element(index, item)?);
        }
        Ok(copy)
    }
}

impl<T: DeepCopy> DeepCopy for VecDeque<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut copy = Self::with_capacity(self.len());
        for (index, item) in self.iter().enumerate() {
            copy.push_back(cx.element(index, item)?);
        }
        Ok(copy)
    }
}

impl<T: DeepCopy> DeepCopy for Box<[T]> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut copy = Vec::with_capacity(self.len());
        for (index, item) in self.iter().enumerate() {
            copy.push(cx.element(index, item)?);
        }
        Ok(copy.into_boxed_slice())
    }
}

impl<T: DeepCopy, const N: usize> DeepCopy for [T; N] {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut items = Vec::with_capacity(N);
        for (index, item) in self.iter().enumerate() {
            items.push(cx.element(index, item)?);
        }
        // Exactly N items were pushed, so the conversion cannot fail.
        items
            .try_into()
            .map_err(|_: Vec<T>| cx.unsupported::<Self>())
    }
}

impl<K, V, S> DeepCopy for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + Debug,
    V: DeepCopy,
    S: BuildHasher + Clone,
{
    fn shape(&self) -> Shape {
        Shape::Map
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut copy = Self::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            let value = cx.entry(key, value)?;
            copy.insert(key.clone(), value);
        }
        Ok(copy)
    }
}

impl<K, V> DeepCopy for BTreeMap<K, V>
where
    K: Ord + Clone + Debug,
    V: DeepCopy,
{
    fn shape(&self) -> Shape {
        Shape::Map
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        let mut copy = Self::new();
        for (key, value) in self {
            let value = cx.entry(key, value)?;
            copy.insert(key.clone(), value);
        }
        Ok(copy)
    }
}

// Sets are maps without values: elements are keys and are kept as they are,
// otherwise two elements could collapse into one after the transform.
impl<K, S> DeepCopy for HashSet<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn shape(&self) -> Shape {
        Shape::Map
    }

    fn deep_copy(&self, _cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Ok(self.clone())
    }
}

impl<K: Ord + Clone> DeepCopy for BTreeSet<K> {
    fn shape(&self) -> Shape {
        Shape::Map
    }

    fn deep_copy(&self, _cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        Ok(self.clone())
    }
}

macro_rules! impl_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: DeepCopy),+> DeepCopy for ($($name,)+) {
            fn shape(&self) -> Shape {
                Shape::Aggregate
            }

            fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
                Ok(($(cx.field(stringify!($idx), &self.$idx)?,)+))
            }
        }
    };
}

impl_tuple!(A 0);
impl_tuple!(A 0, B 1);
impl_tuple!(A 0, B 1, C 2);
impl_tuple!(A 0, B 1, C 2, D 3);
impl_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
