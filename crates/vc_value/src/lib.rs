#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod mapping;
mod serde;
mod value;

pub mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use kind::{TypeMismatch, ValueKind};
pub use mapping::{IntoIter, Iter, Mapping};
pub use path::{PathParseError, Segment, ValuePath};
pub use value::Value;
