use core::marker::PhantomData;

use vc_value::Value;

use crate::{DeserializationNavigator, Error, Serializable, SerializationNavigator};

// -----------------------------------------------------------------------------
// Converter

/// Custom (de)serialization for a single property.
///
/// Converters are stateless, so every method is an associated function and
/// a converter is named by type, e.g. `#[serial(converter = "UnixSeconds")]`.
///
/// # Examples
///
/// ```
/// use vc_serializer::{Converter, DeserializationNavigator, Error, SerializationNavigator, Value};
///
/// /// Writes a `bool` as `"yes"` / `"no"`.
/// struct YesNo;
///
/// impl Converter<bool> for YesNo {
///     fn serialize(value: &bool, nav: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
///         Ok(nav.visit_string(if *value { "yes" } else { "no" }))
///     }
///
///     fn deserialize(data: &Value, nav: &mut DeserializationNavigator<'_>) -> Result<bool, Error> {
///         match &*nav.read_string(data)? {
///             "yes" => Ok(true),
///             "no" => Ok(false),
///             other => Err(nav.invalid_value("`yes` or `no`", other)),
///         }
///     }
/// }
/// ```
pub trait Converter<T> {
    fn serialize(value: &T, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error>;

    fn deserialize(data: &Value, navigator: &mut DeserializationNavigator<'_>) -> Result<T, Error>;

    /// Emptiness for `skip_when_empty`. Nothing is empty by default.
    #[inline]
    fn is_empty(value: &T) -> bool {
        let _ = value;
        false
    }
}

// -----------------------------------------------------------------------------
// Converted

/// A borrowed value serialized through converter `C`.
pub struct Converted<'a, C, T> {
    value: &'a T,
    _marker: PhantomData<fn() -> C>,
}

impl<'a, C: Converter<T>, T> Converted<'a, C, T> {
    #[inline]
    pub const fn new(value: &'a T) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<C: Converter<T>, T> Serializable for Converted<'_, C, T> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        C::serialize(self.value, navigator)
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        C::is_empty(self.value)
    }
}
