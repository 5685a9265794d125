use alloc::format;

use vc_value::Value;

use super::{Deserializable, DeserializationNavigator};
use crate::error::MissingReason;
use crate::info::{ObjectInfo, PropertyMetadata};
use crate::{Converter, Error};

// -----------------------------------------------------------------------------
// Lookup

/// Where a property stands in the source document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'v> {
    /// Present with a non-null value.
    Found(&'v Value),
    /// Present with an explicit null.
    Null,
    /// Absent, or excluded by the context.
    Missing,
}

impl<'v> Lookup<'v> {
    #[inline]
    pub fn from_option(value: Option<&'v Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(Value::Null) => Self::Null,
            Some(value) => Self::Found(value),
        }
    }

    /// Finds `property` in the object node `data`.
    ///
    /// Candidates are tried in order: the structured path if declared, each
    /// alias, then the wire name. The first present key wins, even if it
    /// holds null.
    pub fn resolve(data: &'v Value, property: &PropertyMetadata) -> Self {
        if let Some(path) = property.lookup_path()
            && let Some(value) = data.dig(path.segments())
        {
            log::trace!("`{}` resolved through path `{path}`", property.name());
            return Self::from_option(Some(value));
        }

        let Ok(mapping) = data.as_mapping() else {
            return Self::Missing;
        };

        for alias in property.alias_names() {
            if let Some(value) = mapping.get(alias) {
                log::trace!("`{}` resolved through alias `{alias}`", property.name());
                return Self::from_option(Some(value));
            }
        }

        Self::from_option(mapping.get(property.external_name()))
    }

    #[inline]
    pub fn value(self) -> Option<&'v Value> {
        match self {
            Self::Found(value) => Some(value),
            Self::Null | Self::Missing => None,
        }
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

// -----------------------------------------------------------------------------
// PropertyValues

/// The looked-up properties of one object node, indexed by slot.
///
/// Each `required`/`or_default` method applies the three-way policy:
///
/// | lookup          | nilable type | with default   | otherwise                    |
/// |-----------------|--------------|----------------|------------------------------|
/// | found, non-null | convert      | convert        | convert                      |
/// | found, null     | null         | keep default   | `RequiredFieldError(Null)`   |
/// | not found       | null         | keep default   | `RequiredFieldError(Missing)`|
///
/// A type is nilable if [`Deserializable::from_null`] returns a value,
/// e.g. `Option<T>`.
#[derive(Debug)]
pub struct PropertyValues<'v> {
    info: &'static ObjectInfo,
    lookups: alloc::vec::Vec<Lookup<'v>>,
    data: &'v Value,
}

impl<'v> PropertyValues<'v> {
    #[inline]
    pub(crate) fn new(
        info: &'static ObjectInfo,
        lookups: alloc::vec::Vec<Lookup<'v>>,
        data: &'v Value,
    ) -> Self {
        Self {
            info,
            lookups,
            data,
        }
    }

    #[inline]
    pub fn info(&self) -> &'static ObjectInfo {
        self.info
    }

    /// The whole object node.
    #[inline]
    pub fn data(&self) -> &'v Value {
        self.data
    }

    #[inline]
    pub fn lookup(&self, slot: usize) -> Lookup<'v> {
        self.lookups.get(slot).copied().unwrap_or(Lookup::Missing)
    }

    fn property(&self, slot: usize) -> Result<&'static PropertyMetadata, Error> {
        self.info
            .property_at(slot)
            .ok_or_else(|| Error::MissingPropertyValue {
                type_path: self.info.type_path(),
                property: format!("#{slot}").into(),
            })
    }

    /// Converts the property at `slot`, failing if it is required and absent or null.
    pub fn required<T: Deserializable>(
        &self,
        navigator: &mut DeserializationNavigator<'_>,
        slot: usize,
    ) -> Result<T, Error> {
        let property = self.property(slot)?;
        match self.lookup(slot) {
            Lookup::Found(value) => navigator.accept_property(property, value),
            Lookup::Null => T::from_null()
                .ok_or_else(|| navigator.required_field(self.info, property, MissingReason::Null)),
            Lookup::Missing => T::from_null().ok_or_else(|| {
                navigator.required_field(self.info, property, MissingReason::Missing)
            }),
        }
    }

    /// Converts the property at `slot`, keeping `default` when it is absent
    /// or, for non-nilable types, null.
    pub fn or_default<T: Deserializable>(
        &self,
        navigator: &mut DeserializationNavigator<'_>,
        slot: usize,
        default: impl FnOnce() -> T,
    ) -> Result<T, Error> {
        let property = self.property(slot)?;
        match self.lookup(slot) {
            Lookup::Found(value) => navigator.accept_property(property, value),
            Lookup::Null => Ok(T::from_null().unwrap_or_else(default)),
            Lookup::Missing => Ok(default()),
        }
    }

    /// Like [`required`](Self::required), reading through converter `C`.
    /// Converted properties are never nilable.
    pub fn convert_required<C: Converter<T>, T>(
        &self,
        navigator: &mut DeserializationNavigator<'_>,
        slot: usize,
    ) -> Result<T, Error> {
        let property = self.property(slot)?;
        match self.lookup(slot) {
            Lookup::Found(value) => navigator.convert_property::<C, T>(property, value),
            Lookup::Null => Err(navigator.required_field(self.info, property, MissingReason::Null)),
            Lookup::Missing => {
                Err(navigator.required_field(self.info, property, MissingReason::Missing))
            }
        }
    }

    /// Like [`or_default`](Self::or_default), reading through converter `C`.
    pub fn convert_or_default<C: Converter<T>, T>(
        &self,
        navigator: &mut DeserializationNavigator<'_>,
        slot: usize,
        default: impl FnOnce() -> T,
    ) -> Result<T, Error> {
        let property = self.property(slot)?;
        match self.lookup(slot) {
            Lookup::Found(value) => navigator.convert_property::<C, T>(property, value),
            Lookup::Null | Lookup::Missing => Ok(default()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_value::{Mapping, Value, ValuePath};

    use super::Lookup;
    use crate::info::PropertyMetadata;

    fn doc(entries: &[(&str, Value)]) -> Value {
        Value::Mapping(entries.iter().cloned().collect::<Mapping>())
    }

    #[test]
    fn external_name_then_alias() {
        let meta = PropertyMetadata::new("a_prop").alias("old_name");

        let data = doc(&[("a_prop", Value::from("x"))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Found(&Value::from("x")));

        let data = doc(&[("old_name", Value::from("y"))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Found(&Value::from("y")));

        let data = doc(&[("other", Value::from("z"))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Missing);
    }

    #[test]
    fn aliases_in_declared_order() {
        let meta = PropertyMetadata::new("v").aliases(["first", "second"]);
        let data = doc(&[("second", Value::Int(2)), ("first", Value::Int(1)), ("v", Value::Int(0))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Found(&Value::Int(1)));
    }

    #[test]
    fn null_is_not_missing() {
        let meta = PropertyMetadata::new("id");
        let data = doc(&[("id", Value::Null)]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Null);
        assert_eq!(Lookup::resolve(&Value::Int(1), &meta), Lookup::Missing);
    }

    #[test]
    fn structured_path_first() {
        let meta = PropertyMetadata::new("city").path(ValuePath::parse("address.city").unwrap());
        let address = doc(&[("city", Value::from("Oslo"))]);
        let data = doc(&[("address", address), ("city", Value::from("ignored"))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Found(&Value::from("Oslo")));

        // falls back to the wire name when the path does not resolve
        let data = doc(&[("city", Value::from("Bergen"))]);
        assert_eq!(Lookup::resolve(&data, &meta), Lookup::Found(&Value::from("Bergen")));
    }
}
