//! Serialization: live values to [`Value`] trees.
//!
//! - [`Serializable`]: anything the [`SerializationNavigator`] can accept.
//! - [`SerializableObject`]: types described by an
//!   [`ObjectInfo`], walked property by property.
//! - [`FieldValue`] / [`SerializedProperty`]: the materialized value of one
//!   property, borrowed from a field or produced by an accessor.

// -----------------------------------------------------------------------------
// Modules

mod impls;
mod navigator;

// -----------------------------------------------------------------------------
// Exports

pub use navigator::SerializationNavigator;

use alloc::boxed::Box;
use alloc::vec::Vec;

use vc_value::Value;

use crate::info::{ObjectInfo, PropertyMetadata};
use crate::{Converted, Converter, Error};

// -----------------------------------------------------------------------------
// Serializable

/// A value the [`SerializationNavigator`] can turn into a [`Value`].
///
/// Implemented for primitives, strings, options, standard collections,
/// [`Value`] itself, and by `#[derive(Serializable)]`.
pub trait Serializable {
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error>;

    /// Whether this equals the default-constructed value of its type:
    /// `""`, `0`, `false`, `None` or an empty collection.
    ///
    /// Used by `skip_when_empty`. Objects are never empty.
    #[inline]
    fn is_empty_value(&self) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// FieldValue

/// The materialized value of one property.
pub enum FieldValue<'a> {
    /// Borrowed from a field.
    Borrowed(&'a dyn Serializable),
    /// Produced by an accessor or wrapped in a converter.
    Owned(Box<dyn Serializable + 'a>),
}

impl<'a> FieldValue<'a> {
    #[inline]
    pub fn borrowed<T: Serializable>(value: &'a T) -> Self {
        Self::Borrowed(value)
    }

    #[inline]
    pub fn owned<T: Serializable + 'a>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }

    /// Serializes `value` through converter `C`.
    #[inline]
    pub fn converted<C: Converter<T> + 'a, T: 'a>(value: &'a T) -> Self {
        Self::Owned(Box::new(Converted::<C, T>::new(value)))
    }

    #[inline]
    pub fn get(&self) -> &(dyn Serializable + 'a) {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl core::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Borrowed(_) => "FieldValue::Borrowed(..)",
            Self::Owned(_) => "FieldValue::Owned(..)",
        })
    }
}

/// A property paired with its value, fetched from a live instance.
#[derive(Debug)]
pub struct SerializedProperty<'a> {
    pub metadata: &'static PropertyMetadata,
    pub value: FieldValue<'a>,
}

// -----------------------------------------------------------------------------
// SerializableObject

/// A type described by an [`ObjectInfo`].
///
/// Implementations usually come from `#[derive(Serializable)]`; their
/// [`Serializable`] impl forwards to
/// [`SerializationNavigator::visit_object`].
pub trait SerializableObject {
    fn object_info(&self) -> &'static ObjectInfo;

    /// Returns the value of `property`, matched by
    /// [`slot`](PropertyMetadata::slot).
    fn property_value(&self, property: &PropertyMetadata) -> Option<FieldValue<'_>>;

    /// Pairs every serializable property, in resolved order, with its
    /// value. All values are fetched up front.
    fn serialization_properties(&self) -> Result<Vec<SerializedProperty<'_>>, Error> {
        let info = self.object_info();
        info.serialization_properties()
            .map(|metadata| match self.property_value(metadata) {
                Some(value) => Ok(SerializedProperty { metadata, value }),
                None => Err(Error::MissingPropertyValue {
                    type_path: info.type_path(),
                    property: metadata.name_cow().clone(),
                }),
            })
            .collect()
    }

    /// Runs before any property is fetched.
    #[inline]
    fn pre_serialize(&self) {}

    /// Runs after the object is complete.
    #[inline]
    fn post_serialize(&self) {}
}
