use alloc::borrow::{Cow, ToOwned};
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use vc_value::{Mapping, Value};

use super::{Serializable, SerializationNavigator};
use crate::Error;

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl Serializable for $ty {
                #[inline]
                fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
                    Ok(navigator.visit_int(*self as i64))
                }

                #[inline]
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Serializable for $ty {
                #[inline]
                fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
                    Ok(navigator.visit_u64(*self as u64))
                }

                #[inline]
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u8, u16, u32, u64, usize);

impl Serializable for f32 {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_float(f64::from(*self)))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl Serializable for f64 {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_float(*self))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == 0.0
    }
}

impl Serializable for bool {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_bool(*self))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Serializable for char {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_string(self.encode_utf8(&mut [0; 4])))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        *self == '\0'
    }
}

impl Serializable for str {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_string(self))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Serializable for String {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_string(self))
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Serializable for () {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        Ok(navigator.visit_null())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// Wrappers

impl<T: Serializable + ?Sized> Serializable for &T {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        (**self).serialize_with(navigator)
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Serializable + ?Sized> Serializable for Box<T> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        (**self).serialize_with(navigator)
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Serializable + ToOwned + ?Sized> Serializable for Cow<'_, T> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        (**self).serialize_with(navigator)
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Serializable> Serializable for Option<T> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        match self {
            Some(value) => navigator.accept(value),
            None => Ok(navigator.visit_null()),
        }
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

// -----------------------------------------------------------------------------
// Collections

macro_rules! impl_sequence {
    ($(<$($param:ident $(: $bound:path)?),*> $ty:ty),* $(,)?) => {
        $(
            impl<$($param: Serializable $(+ $bound)?),*> Serializable for $ty {
                #[inline]
                fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
                    navigator.visit_sequence(self.iter())
                }

                #[inline]
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }
            }
        )*
    };
}

impl_sequence!(
    <T> [T],
    <T> Vec<T>,
    <T> VecDeque<T>,
    <T: Ord> BTreeSet<T>,
);

impl<T: Serializable, const N: usize> Serializable for [T; N] {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        navigator.visit_sequence(self.iter())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<K: AsRef<str>, V: Serializable> Serializable for BTreeMap<K, V> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        navigator.visit_mapping(self.iter())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(feature = "std")]
impl<K: AsRef<str>, V: Serializable, S> Serializable for std::collections::HashMap<K, V, S> {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        navigator.visit_mapping(self.iter())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Dynamic values

impl Serializable for Mapping {
    #[inline]
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        navigator.visit_mapping(self.iter())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Re-visits the tree, so format rules such as JSON's non-finite floats
/// still apply.
impl Serializable for Value {
    fn serialize_with(&self, navigator: &mut SerializationNavigator<'_>) -> Result<Value, Error> {
        match self {
            Value::Null => Ok(navigator.visit_null()),
            Value::Bool(v) => Ok(navigator.visit_bool(*v)),
            Value::Int(v) => Ok(navigator.visit_int(*v)),
            Value::Float(v) => Ok(navigator.visit_float(*v)),
            Value::String(v) => Ok(navigator.visit_string(v)),
            Value::Sequence(items) => navigator.visit_sequence(items),
            Value::Mapping(map) => map.serialize_with(navigator),
        }
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
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

    use crate::ser::{Serializable, SerializationNavigator};
    use crate::visitor::YamlSerializationVisitor;
    use crate::SerializationContext;

    fn to_value<T: Serializable + ?Sized>(value: &T) -> Value {
        let ctx = SerializationContext::new();
        let mut visitor = YamlSerializationVisitor::new();
        SerializationNavigator::new(&mut visitor, &ctx)
            .accept(value)
            .unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(to_value(&-3i8), Value::Int(-3));
        assert_eq!(to_value(&u64::MAX), Value::Float(u64::MAX as f64));
        assert_eq!(to_value(&(i64::MAX as u64)), Value::Int(i64::MAX));
        assert_eq!(to_value(&'x'), Value::from("x"));
        assert_eq!(to_value(&f64::INFINITY), Value::Float(f64::INFINITY));
        assert_eq!(to_value(&None::<u8>), Value::Null);
    }

    #[test]
    fn collections() {
        let nested = vec![vec![1u8], vec![]];
        assert_eq!(
            to_value(&nested),
            Value::from_iter([Value::from_iter([Value::Int(1)]), Value::Sequence(Vec::new())])
        );

        let mut map = BTreeMap::new();
        map.insert(String::from("b"), true);
        map.insert(String::from("a"), false);
        let expected: Mapping = [("a", false), ("b", true)].into_iter().collect();
        assert_eq!(to_value(&map), Value::Mapping(expected));
    }

    #[test]
    fn emptiness() {
        assert!("".is_empty_value());
        assert!(!"x".is_empty_value());
        assert!(0u32.is_empty_value());
        assert!(Vec::<u8>::new().is_empty_value());
        assert!(None::<String>.is_empty_value());
        assert!(!Some(String::new()).is_empty_value());
        assert!(Value::Null.is_empty_value());
        assert!(![1u8].is_empty_value());
    }
}
