//! [`DeepCopy`](crate::DeepCopy) implementations for foreign types.
//!
//! One file per shape family:
//! - `scalar`: numbers, `bool`, `char`, time and path leaves, plus the
//!   runtime-unsupported raw pointers and channels
//! - `text`: `String`, `Box<str>`, `Cow<str>`
//! - `pointer`: `Option`, `Box`, `Rc`, `Arc`, `Weak` and interior-mutability
//!   cells
//! - `collections`: sequences, maps, sets and tuples
//! - `dynamic`: `Box<dyn DynCopy>` and `serde_json::Value`

mod collections;
mod dynamic;
mod pointer;
mod scalar;
mod text;
