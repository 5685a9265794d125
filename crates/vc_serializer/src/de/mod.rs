//! Deserialization: [`Value`] trees to typed values.
//!
//! - [`Deserializable`]: anything the [`DeserializationNavigator`] can
//!   produce.
//! - [`DeserializableObject`]: types described by an [`ObjectInfo`],
//!   constructed from [`PropertyValues`].
//! - [`Lookup`]: the three-way outcome of finding a property in a
//!   document. An absent key and an explicit null are different things.

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod navigator;
mod values;

// -----------------------------------------------------------------------------
// Exports

pub use navigator::DeserializationNavigator;
pub use values::{Lookup, PropertyValues};

use vc_value::Value;

use crate::Error;
use crate::info::ObjectInfo;

// -----------------------------------------------------------------------------
// Deserializable

/// A type the [`DeserializationNavigator`] can build from a [`Value`].
pub trait Deserializable: Sized {
    fn deserialize_with(
        navigator: &mut DeserializationNavigator<'_>,
        data: &Value,
    ) -> Result<Self, Error>;

    /// The value for an explicit null or a missing property, for types
    /// that accept one. `None` marks the type as required.
    #[inline]
    fn from_null() -> Option<Self> {
        None
    }
}

// -----------------------------------------------------------------------------
// DeserializableObject

/// A type described by an [`ObjectInfo`].
///
/// The navigator resolves a [`Lookup`] for every property, then hands them
/// to [`apply`](Self::apply), which converts and assigns them using
/// [`PropertyValues`].
pub trait DeserializableObject: Sized {
    fn object_info() -> &'static ObjectInfo;

    /// Constructs the object from the looked-up properties.
    fn apply(
        navigator: &mut DeserializationNavigator<'_>,
        properties: PropertyValues<'_>,
    ) -> Result<Self, Error>;

    /// Runs once the object is constructed.
    #[inline]
    fn post_deserialize(&mut self) {}
}
