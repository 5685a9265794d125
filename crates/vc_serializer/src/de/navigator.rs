use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use vc_value::{Mapping, Segment, TypeMismatch, Value, ValuePath};

use super::{Deserializable, DeserializableObject, Lookup, PropertyValues};
use crate::error::{MissingReason, RequiredFieldError};
use crate::info::{ObjectInfo, PropertyMetadata};
use crate::visitor::DeserializationVisitor;
use crate::{Converter, DeserializationContext, Error};

/// Walks a [`Value`] tree, building typed values.
///
/// The navigator keeps the trail of keys and indices from the root to the
/// node being read, so every error carries the document path of the
/// offending value, e.g. `orders[3].lines[0].qty`.
///
/// # Examples
///
/// ```
/// use vc_serializer::visitor::JsonDeserializationVisitor;
/// use vc_serializer::{DeserializationContext, DeserializationNavigator, Error, Value};
///
/// let ctx = DeserializationContext::new();
/// let visitor = JsonDeserializationVisitor;
/// let mut nav = DeserializationNavigator::new(&visitor, &ctx);
///
/// let data = Value::from_iter([Value::Int(1), Value::from("two")]);
/// let err = nav.accept::<Vec<u8>>(&data).unwrap_err();
/// assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "[1]"));
/// ```
pub struct DeserializationNavigator<'a> {
    visitor: &'a dyn DeserializationVisitor,
    context: &'a DeserializationContext,
    trail: Vec<Segment<'static>>,
}

impl<'a> DeserializationNavigator<'a> {
    #[inline]
    pub fn new(
        visitor: &'a dyn DeserializationVisitor,
        context: &'a DeserializationContext,
    ) -> Self {
        Self {
            visitor,
            context,
            trail: Vec::new(),
        }
    }

    #[inline]
    pub fn context(&self) -> &'a DeserializationContext {
        self.context
    }

    #[inline]
    pub fn visitor(&self) -> &'a dyn DeserializationVisitor {
        self.visitor
    }

    /// The document path of the node being read. Empty at the root.
    pub fn path(&self) -> String {
        ValuePath::from_segments(self.trail.iter().cloned()).to_string()
    }

    /// Builds any [`Deserializable`] type from `data`.
    #[inline]
    pub fn accept<T: Deserializable>(&mut self, data: &Value) -> Result<T, Error> {
        T::deserialize_with(self, data)
    }

    /// Like [`accept`](Self::accept), with `segment` appended to the path
    /// while `data` is read.
    pub fn accept_at<T: Deserializable>(
        &mut self,
        segment: Segment<'static>,
        data: &Value,
    ) -> Result<T, Error> {
        self.nested(segment, |navigator| navigator.accept(data))
    }

    /// Reads the value of `property`.
    #[inline]
    pub fn accept_property<T: Deserializable>(
        &mut self,
        property: &PropertyMetadata,
        data: &Value,
    ) -> Result<T, Error> {
        self.accept_at(property_segment(property), data)
    }

    /// Reads the value of `property` through converter `C`.
    pub fn convert_property<C: Converter<T>, T>(
        &mut self,
        property: &PropertyMetadata,
        data: &Value,
    ) -> Result<T, Error> {
        self.nested(property_segment(property), |navigator| {
            C::deserialize(data, navigator)
        })
    }

    fn nested<T>(
        &mut self,
        segment: Segment<'static>,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.trail.push(segment);
        let result = f(self);
        self.trail.pop();
        result
    }

    // -------------------------------------------------------------------------
    // Errors

    pub(crate) fn mismatch(&self, source: TypeMismatch) -> Error {
        Error::TypeMismatch {
            source,
            path: self.path(),
        }
    }

    /// An [`Error::InvalidValue`] at the current path, for values of the
    /// right shape but outside what the target accepts.
    pub fn invalid_value(
        &self,
        expected: impl Into<Cow<'static, str>>,
        found: impl fmt::Display,
    ) -> Error {
        Error::InvalidValue {
            expected: expected.into(),
            found: found.to_string(),
            path: self.path(),
        }
    }

    pub(crate) fn required_field(
        &self,
        owner: &ObjectInfo,
        property: &PropertyMetadata,
        reason: MissingReason,
    ) -> Error {
        let path = ValuePath::from_segments(
            self.trail
                .iter()
                .cloned()
                .chain(core::iter::once(property_segment(property))),
        );
        log::debug!("{}: required property `{path}` is {reason}", owner.type_path());
        Error::RequiredField(RequiredFieldError {
            type_path: owner.type_path(),
            property: property.name_cow().clone(),
            path: path.to_string(),
            reason,
        })
    }

    // -------------------------------------------------------------------------
    // Scalars

    #[inline]
    pub fn read_bool(&self, data: &Value) -> Result<bool, Error> {
        self.visitor.read_bool(data).map_err(|e| self.mismatch(e))
    }

    #[inline]
    pub fn read_int(&self, data: &Value) -> Result<i64, Error> {
        self.visitor.read_int(data).map_err(|e| self.mismatch(e))
    }

    #[inline]
    pub fn read_float(&self, data: &Value) -> Result<f64, Error> {
        self.visitor.read_float(data).map_err(|e| self.mismatch(e))
    }

    #[inline]
    pub fn read_string<'v>(&self, data: &'v Value) -> Result<Cow<'v, str>, Error> {
        self.visitor.read_string(data).map_err(|e| self.mismatch(e))
    }

    /// Reads an integer and narrows it to `T`, failing with
    /// [`Error::InvalidValue`] if it does not fit.
    pub fn read_integer<T: TryFrom<i64>>(
        &self,
        data: &Value,
        expected: &'static str,
    ) -> Result<T, Error> {
        let value = self.read_int(data)?;
        T::try_from(value).map_err(|_| self.invalid_value(expected, value))
    }

    /// Reads an unsigned 64-bit integer.
    ///
    /// Values above `i64::MAX` are stored as floats, so integral floats in
    /// range are accepted too. `2^64`, the float nearest to `u64::MAX`,
    /// reads as `u64::MAX`.
    pub fn read_u64(&self, data: &Value) -> Result<u64, Error> {
        const LIMIT: f64 = 18_446_744_073_709_551_616.0;

        if let Value::Float(v) = *data {
            if v == LIMIT {
                return Ok(u64::MAX);
            }
            if (0.0..LIMIT).contains(&v) && (v as u64) as f64 == v {
                return Ok(v as u64);
            }
            return Err(self.invalid_value("u64", v));
        }
        self.read_integer(data, "u64")
    }

    // -------------------------------------------------------------------------
    // Containers

    #[inline]
    pub fn read_sequence<'v>(&self, data: &'v Value) -> Result<&'v [Value], Error> {
        self.visitor.read_sequence(data).map_err(|e| self.mismatch(e))
    }

    #[inline]
    pub fn read_mapping<'v>(&self, data: &'v Value) -> Result<&'v Mapping, Error> {
        self.visitor.read_mapping(data).map_err(|e| self.mismatch(e))
    }

    /// Reads every element of a sequence.
    pub fn visit_sequence<T: Deserializable>(&mut self, data: &Value) -> Result<Vec<T>, Error> {
        self.read_sequence(data)?
            .iter()
            .enumerate()
            .map(|(index, item)| self.accept_at(Segment::Index(index), item))
            .collect()
    }

    /// Reads every entry of a mapping, in document order.
    pub fn visit_entries<T: Deserializable>(
        &mut self,
        data: &Value,
    ) -> Result<Vec<(String, T)>, Error> {
        self.read_mapping(data)?
            .iter()
            .map(|(key, value)| {
                let segment = Segment::Key(Cow::Owned(key.into()));
                Ok::<_, Error>((key.into(), self.accept_at(segment, value)?))
            })
            .collect()
    }

    /// Builds an object from a mapping node.
    ///
    /// Every property gets a [`Lookup`]: properties that do not deserialize
    /// or that the context excludes are treated as absent, the others are
    /// resolved by path, aliases, then wire name. The object's
    /// [`apply`](DeserializableObject::apply) then assigns them, and
    /// `post_deserialize` runs on the result.
    pub fn visit_object<T: DeserializableObject>(&mut self, data: &Value) -> Result<T, Error> {
        let info = T::object_info();
        self.read_mapping(data)?;

        let lookups = info
            .properties()
            .iter()
            .map(|property| {
                if !property.deserializes() {
                    Lookup::Missing
                } else if self.context.should_skip(info, property) {
                    log::trace!("{}: `{}` excluded", info.type_path(), property.name());
                    Lookup::Missing
                } else {
                    Lookup::resolve(data, property)
                }
            })
            .collect();

        let mut object = T::apply(self, PropertyValues::new(info, lookups, data))?;
        object.post_deserialize();
        Ok(object)
    }
}

#[inline]
fn property_segment(property: &PropertyMetadata) -> Segment<'static> {
    Segment::Key(Cow::Owned(property.external_name().into()))
}

impl fmt::Debug for DeserializationNavigator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializationNavigator")
            .field("context", self.context)
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}
