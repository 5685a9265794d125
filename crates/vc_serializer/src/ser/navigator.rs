use vc_value::Value;

use super::{Serializable, SerializableObject};
use crate::visitor::SerializationVisitor;
use crate::{Error, SerializationContext};

/// Walks live values, driving a [`SerializationVisitor`].
///
/// One navigator serves one top-level call. Errors are terminal: the
/// visitor's frames are left as they were and the navigator should be
/// dropped.
///
/// # Examples
///
/// ```
/// use vc_serializer::visitor::JsonSerializationVisitor;
/// use vc_serializer::{SerializationContext, SerializationNavigator, Value};
///
/// let ctx = SerializationContext::new();
/// let mut visitor = JsonSerializationVisitor::new();
/// let mut nav = SerializationNavigator::new(&mut visitor, &ctx);
///
/// let value = nav.accept(&vec![Some(1.5), None, Some(f64::NAN)]).unwrap();
/// assert_eq!(value, Value::from_iter([Value::Float(1.5), Value::Null, Value::Null]));
/// ```
pub struct SerializationNavigator<'a> {
    visitor: &'a mut dyn SerializationVisitor,
    context: &'a SerializationContext,
}

impl<'a> SerializationNavigator<'a> {
    #[inline]
    pub fn new(
        visitor: &'a mut dyn SerializationVisitor,
        context: &'a SerializationContext,
    ) -> Self {
        Self { visitor, context }
    }

    #[inline]
    pub fn context(&self) -> &'a SerializationContext {
        self.context
    }

    /// Serializes any [`Serializable`] value.
    #[inline]
    pub fn accept<T: Serializable + ?Sized>(&mut self, value: &T) -> Result<Value, Error> {
        value.serialize_with(self)
    }

    // -------------------------------------------------------------------------
    // Scalars

    #[inline]
    pub fn visit_null(&mut self) -> Value {
        self.visitor.visit_null()
    }

    #[inline]
    pub fn visit_bool(&mut self, value: bool) -> Value {
        self.visitor.visit_bool(value)
    }

    #[inline]
    pub fn visit_int(&mut self, value: i64) -> Value {
        self.visitor.visit_int(value)
    }

    /// Values above `i64::MAX` are visited as floats, which hold them
    /// exactly only up to 53 significant bits. `u64::MAX` rounds to `2^64`,
    /// which [`read_u64`](crate::DeserializationNavigator::read_u64) maps
    /// back.
    #[inline]
    pub fn visit_u64(&mut self, value: u64) -> Value {
        match i64::try_from(value) {
            Ok(value) => self.visitor.visit_int(value),
            Err(_) => self.visitor.visit_float(value as f64),
        }
    }

    #[inline]
    pub fn visit_float(&mut self, value: f64) -> Value {
        self.visitor.visit_float(value)
    }

    #[inline]
    pub fn visit_string(&mut self, value: &str) -> Value {
        self.visitor.visit_string(value)
    }

    // -------------------------------------------------------------------------
    // Containers

    /// Serializes every item into a sequence.
    pub fn visit_sequence<I>(&mut self, items: I) -> Result<Value, Error>
    where
        I: IntoIterator,
        I::Item: Serializable,
    {
        self.visitor.begin_array();
        for item in items {
            let value = self.accept(&item)?;
            self.visitor.add_element(value);
        }
        Ok(self.visitor.end_array())
    }

    /// Serializes string-keyed entries into a mapping, in iteration order.
    pub fn visit_mapping<I, K, V>(&mut self, entries: I) -> Result<Value, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serializable,
    {
        self.visitor.begin_object();
        for (key, value) in entries {
            let value = self.accept(&value)?;
            self.visitor.add_property(key.as_ref(), value);
        }
        Ok(self.visitor.end_object())
    }

    /// Serializes an object property by property.
    ///
    /// 1. `pre_serialize` runs and all property values are fetched.
    /// 2. Properties skipped by the context's strategies are left out.
    /// 3. `skip_when_empty` properties holding an empty value are left out.
    /// 4. Remaining values are serialized; nulls are left out unless the
    ///    context emits them.
    /// 5. `post_serialize` runs once the object is complete.
    pub fn visit_object<T: SerializableObject + ?Sized>(
        &mut self,
        object: &T,
    ) -> Result<Value, Error> {
        object.pre_serialize();

        let info = object.object_info();
        let properties = object.serialization_properties()?;

        self.visitor.begin_object();
        for property in &properties {
            let metadata = property.metadata;
            if self.context.should_skip(info, metadata) {
                log::trace!("{}: `{}` excluded", info.type_path(), metadata.name());
                continue;
            }

            let value = property.value.get();
            if metadata.skips_when_empty() && value.is_empty_value() {
                log::trace!("{}: `{}` is empty, skipped", info.type_path(), metadata.name());
                continue;
            }

            let visited = self.accept(value)?;
            if visited.is_null() && !self.context.emit_null() {
                continue;
            }
            self.visitor.add_property(metadata.external_name(), visited);
        }
        let result = self.visitor.end_object();

        object.post_serialize();
        Ok(result)
    }
}
