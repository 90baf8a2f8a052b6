use serde_json::{Map, Value};

use crate::copier::{CopyContext, Shape};
use crate::error::CopyError;
use crate::traits::{DeepCopy, DynCopy};

impl DeepCopy for Box<dyn DynCopy> {
    fn shape(&self) -> Shape {
        Shape::Dynamic
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        // Dispatch on the boxed value; `self.dyn_copy` would pick the box's
        // own blanket impl and wrap it a second time.
        (**self).dyn_copy(cx)
    }
}

// A JSON value is a dynamic holder whose shape depends on the variant it
// currently holds. `Null` is the empty holder.
impl DeepCopy for Value {
    fn shape(&self) -> Shape {
        match self {
            Self::Null | Self::Bool(_) | Self::Number(_) => Shape::Scalar,
            Self::String(_) => Shape::Text,
            Self::Array(_) => Shape::Sequence,
            Self::Object(_) => Shape::Map,
        }
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        match self {
            Self::String(text) => Ok(Self::String(cx.text(text))),
            Self::Array(items) => {
                let mut copy = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    copy.push(cx.element(index, item)?);
                }
                Ok(Self::Array(copy))
            }
            Self::Object(map) => copy_object(map, cx).map(Self::Object),
            Self::Null | Self::Bool(_) | Self::Number(_) => Ok(self.clone()),
        }
    }
}

impl DeepCopy for Map<String, Value> {
    fn shape(&self) -> Shape {
        Shape::Map
    }

    fn deep_copy(&self, cx: &mut CopyContext<'_>) -> Result<Self, CopyError> {
        copy_object(self, cx)
    }
}

fn copy_object(
    map: &Map<String, Value>,
    cx: &mut CopyContext<'_>,
) -> Result<Map<String, Value>, CopyError> {
    let mut copy = Map::new();
    for (key, value) in map {
        let value = cx.entry(key, value)?;
        copy.insert(key.clone(), value);
    }
    Ok(copy)
}
