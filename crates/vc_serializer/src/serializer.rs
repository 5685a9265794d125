use alloc::string::String;

use vc_value::Value;

use crate::{
    Deserializable, DeserializationContext, DeserializationNavigator, Error, Format, Serializable,
    SerializationContext, SerializationNavigator,
};

/// Serializes `value` to `format` text with a default context.
///
/// # Examples
///
/// ```
/// use vc_serializer::{Format, serialize};
///
/// let text = serialize(&vec![Some(1), None], Format::Json).unwrap();
/// assert_eq!(text, "[1,null]");
/// ```
#[inline]
pub fn serialize<T: Serializable + ?Sized>(value: &T, format: Format) -> Result<String, Error> {
    serialize_with(value, format, &SerializationContext::new())
}

/// Serializes `value` to `format` text.
pub fn serialize_with<T: Serializable + ?Sized>(
    value: &T,
    format: Format,
    context: &SerializationContext,
) -> Result<String, Error> {
    log::debug!("serializing `{}` as {format}", core::any::type_name::<T>());
    let tree = to_value(value, format, context)?;
    format.encode(&tree)
}

/// Serializes `value` to a value tree shaped by `format`'s visitor.
pub fn to_value<T: Serializable + ?Sized>(
    value: &T,
    format: Format,
    context: &SerializationContext,
) -> Result<Value, Error> {
    let mut visitor = format.serialization_visitor();
    SerializationNavigator::new(&mut *visitor, context).accept(value)
}

/// Deserializes a `T` from `format` text with a default context.
///
/// # Examples
///
/// ```
/// use vc_serializer::{Format, deserialize};
///
/// let items: Vec<Option<u8>> = deserialize("[1, null]", Format::Json).unwrap();
/// assert_eq!(items, [Some(1), None]);
/// ```
#[inline]
pub fn deserialize<T: Deserializable>(text: &str, format: Format) -> Result<T, Error> {
    deserialize_with(text, format, &DeserializationContext::new())
}

/// Deserializes a `T` from `format` text.
pub fn deserialize_with<T: Deserializable>(
    text: &str,
    format: Format,
    context: &DeserializationContext,
) -> Result<T, Error> {
    log::debug!("deserializing `{}` from {format}", core::any::type_name::<T>());
    let tree = format.decode(text)?;
    from_value(&tree, format, context)
}

/// Deserializes a `T` from an already decoded value tree, read through
/// `format`'s visitor.
pub fn from_value<T: Deserializable>(
    data: &Value,
    format: Format,
    context: &DeserializationContext,
) -> Result<T, Error> {
    let visitor = format.deserialization_visitor(context);
    DeserializationNavigator::new(&*visitor, context).accept(data)
}
