use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use vc_value::{Mapping, TypeMismatch, Value, ValueKind};

use super::{Deserializable, DeserializationNavigator};
use crate::Error;

// -----------------------------------------------------------------------------
// Scalars

impl Deserializable for bool {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_bool(data)
    }
}

macro_rules! impl_integer {
    ($($ty:ident),*) => {
        $(
            impl Deserializable for $ty {
                #[inline]
                fn deserialize_with(
                    navigator: &mut DeserializationNavigator<'_>,
                    data: &Value,
                ) -> Result<Self, Error> {
                    navigator.read_integer(data, stringify!($ty))
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32);

impl Deserializable for u64 {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_u64(data)
    }
}

impl Deserializable for usize {
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        let value = navigator.read_u64(data)?;
        usize::try_from(value).map_err(|_| navigator.invalid_value("usize", value))
    }
}

impl Deserializable for f64 {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_float(data)
    }
}

impl Deserializable for f32 {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_float(data).map(|v| v as f32)
    }
}

impl Deserializable for char {
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        let s = navigator.read_string(data)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(navigator.invalid_value("a single character", format!("{s:?}"))),
        }
    }
}

impl Deserializable for String {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_string(data).map(|s| s.into_owned())
    }
}

impl Deserializable for () {
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        match data {
            Value::Null => Ok(()),
            other => Err(navigator.mismatch(TypeMismatch::new(ValueKind::Null, other.kind()))),
        }
    }

    #[inline]
    fn from_null() -> Option<Self> {
        Some(())
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: Deserializable> Deserializable for Box<T> {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        T::deserialize_with(navigator, data).map(Box::new)
    }

    #[inline]
    fn from_null() -> Option<Self> {
        T::from_null().map(Box::new)
    }
}

impl<T: Deserializable> Deserializable for Option<T> {
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        match data {
            Value::Null => Ok(None),
            data => T::deserialize_with(navigator, data).map(Some),
        }
    }

    #[inline]
    fn from_null() -> Option<Self> {
        Some(None)
    }
}

// -----------------------------------------------------------------------------
// Collections

impl<T: Deserializable> Deserializable for Vec<T> {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.visit_sequence(data)
    }
}

impl<T: Deserializable> Deserializable for VecDeque<T> {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.visit_sequence::<T>(data).map(VecDeque::from)
    }
}

impl<T: Deserializable + Ord> Deserializable for BTreeSet<T> {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.visit_sequence::<T>(data).map(BTreeSet::from_iter)
    }
}

impl<T: Deserializable, const N: usize> Deserializable for [T; N] {
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        let items = navigator.visit_sequence::<T>(data)?;
        let len = items.len();
        items.try_into().map_err(|_| {
            navigator.invalid_value(format!("a sequence of {N} elements"), format!("{len} elements"))
        })
    }
}

impl<T: Deserializable> Deserializable for BTreeMap<String, T> {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.visit_entries(data).map(BTreeMap::from_iter)
    }
}

#[cfg(feature = "std")]
impl<T, S> Deserializable for std::collections::HashMap<String, T, S>
where
    T: Deserializable,
    S: core::hash::BuildHasher + Default,
{
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.visit_entries(data).map(Self::from_iter)
    }
}

// -----------------------------------------------------------------------------
// Dynamic values

/// Copies the node as is, without consulting the visitor.
impl Deserializable for Value {
    #[inline]
    fn deserialize_with(_: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        Ok(data.to_owned())
    }

    #[inline]
    fn from_null() -> Option<Self> {
        Some(Value::Null)
    }
}

impl Deserializable for Mapping {
    #[inline]
    fn deserialize_with(navigator: &mut DeserializationNavigator<'_>, data: &Value) -> Result<Self, Error> {
        navigator.read_mapping(data).map(ToOwned::to_owned)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use vc_value::{Mapping, Value};

    use crate::visitor::{JsonDeserializationVisitor, YamlDeserializationVisitor};
    use crate::{Deserializable, DeserializationContext, DeserializationNavigator, Error};

    fn json<T: Deserializable>(data: &Value) -> Result<T, Error> {
        let ctx = DeserializationContext::new();
        let visitor = JsonDeserializationVisitor;
        DeserializationNavigator::new(&visitor, &ctx).accept(data)
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(json::<u8>(&Value::Int(255)), Ok(255));
        assert!(matches!(
            json::<u8>(&Value::Int(256)),
            Err(Error::InvalidValue { ref expected, .. }) if expected == "u8"
        ));
        assert!(json::<u32>(&Value::Int(-1)).is_err());
        assert_eq!(json::<i64>(&Value::Float(3.0)), Ok(3));
        assert_eq!(json::<u64>(&Value::Float(18_446_744_073_709_549_568.0)), Ok(18_446_744_073_709_549_568));
        assert_eq!(json::<u64>(&Value::Float(u64::MAX as f64)), Ok(u64::MAX));
        assert!(json::<u64>(&Value::Float(-1.0)).is_err());
        assert!(json::<u64>(&Value::Float(1.0e20)).is_err());
        assert!(json::<u64>(&Value::Float(1.5)).is_err());
    }

    #[test]
    fn scalars() {
        assert_eq!(json::<bool>(&Value::Bool(true)), Ok(true));
        assert_eq!(json::<f64>(&Value::Int(2)), Ok(2.0));
        assert_eq!(json::<char>(&Value::from("x")), Ok('x'));
        assert!(json::<char>(&Value::from("xy")).is_err());
        assert_eq!(json::<String>(&Value::from("s")).as_deref(), Ok("s"));
        assert!(matches!(json::<String>(&Value::Int(1)), Err(Error::TypeMismatch { .. })));
        assert_eq!(json::<()>(&Value::Null), Ok(()));
    }

    #[test]
    fn options_and_nesting() {
        let data = Value::from_iter([Value::Int(1), Value::Null]);
        assert_eq!(json::<Vec<Option<i32>>>(&data), Ok(vec![Some(1), None]));
        assert_eq!(<Option<i32> as Deserializable>::from_null(), Some(None));
        assert_eq!(<i32 as Deserializable>::from_null(), None);

        let err = json::<Vec<i32>>(&data).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "[1]"));
    }

    #[test]
    fn arrays_check_length() {
        let data = Value::from_iter([Value::Int(1), Value::Int(2)]);
        assert_eq!(json::<[u8; 2]>(&data), Ok([1, 2]));
        assert!(matches!(json::<[u8; 3]>(&data), Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn maps_report_key_paths() {
        let inner: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
        let map = json::<BTreeMap<String, u8>>(&Value::Mapping(inner)).unwrap();
        assert_eq!(map.get("b"), Some(&2));

        let inner: Mapping = [("ok", Value::Int(1)), ("bad", Value::from("x"))].into_iter().collect();
        let mut outer = Mapping::new();
        outer.insert("counts", inner);
        let err = json::<BTreeMap<String, BTreeMap<String, u8>>>(&Value::Mapping(outer)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref path, .. } if path == "counts.bad"));
    }

    #[test]
    fn yaml_reads_scalars_as_strings() {
        let ctx = DeserializationContext::new();
        let visitor = YamlDeserializationVisitor::from_context(&ctx);
        let mut nav = DeserializationNavigator::new(&visitor, &ctx);
        assert_eq!(nav.accept::<String>(&Value::Float(1.5)).as_deref(), Ok("1.5"));

        let visitor = YamlDeserializationVisitor::new(false);
        let mut nav = DeserializationNavigator::new(&visitor, &ctx);
        assert!(nav.accept::<String>(&Value::Int(3)).is_err());
    }
}
