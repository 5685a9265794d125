#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// Allows the derive output (`::vc_serializer::...`) to resolve in doctests
// and in this crate's own tests.
extern crate self as vc_serializer;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod convert;
mod error;
mod format;
mod serializer;
mod version;

pub mod de;
pub mod exclusion;
pub mod info;
pub mod ser;
pub mod visitor;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use vc_serializer_derive::Serializable;
pub use vc_value as value;
pub use vc_value::{Mapping, Value};

pub use context::{Context, DeserializationContext, Direction, SerializationContext};
pub use convert::{Converted, Converter};
pub use error::{
    CustomOrderError, Error, FormatError, MissingReason, RequiredFieldError,
    UnsupportedFormatError,
};
pub use format::Format;
pub use serializer::{deserialize, deserialize_with, from_value, serialize, serialize_with, to_value};
pub use version::{Version, VersionParseError};

pub use de::{Deserializable, DeserializableObject, DeserializationNavigator};
pub use info::{NamingStrategy, ObjectInfo, ObjectInfoCell, PropertyMetadata, PropertyOrder};
pub use ser::{Serializable, SerializableObject, SerializationNavigator};
