use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use crate::path::PathParser;
use crate::{Mapping, Segment, TypeMismatch, ValueKind};

// -----------------------------------------------------------------------------
// Value

/// A parsed document node.
///
/// `Value` is the intermediate representation between typed objects and
/// encoded text: visitors build it during serialization and decoders
/// produce it for deserialization.
///
/// All accessors match the tag explicitly and fail with [`TypeMismatch`]
/// on the wrong shape. [`dig`](Value::dig) is the exception: a path that
/// does not resolve simply yields `None`.
///
/// # Examples
///
/// ```
/// use vc_value::{Mapping, Value};
///
/// let mut user = Mapping::new();
/// user.insert("name", "Ferris");
/// user.insert("tags", Value::from_iter([Value::from("crab")]));
/// let doc = Value::Mapping(user);
///
/// assert_eq!(doc.get("name").unwrap().unwrap().as_str().unwrap(), "Ferris");
/// assert_eq!(doc.dig_str("tags[0]"), Some(&Value::from("crab")));
/// assert_eq!(doc.dig_str("tags[1]"), None);
/// assert!(doc.index(0).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for null, the empty string, and empty containers.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(map) => map.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    #[inline(always)]
    fn mismatch(&self, expected: ValueKind) -> TypeMismatch {
        TypeMismatch::new(expected, self.kind())
    }

    // -------------------------------------------------------------------------
    // Structural access

    /// Looks up `key` in a mapping.
    ///
    /// Returns `Ok(None)` if the key is absent, and an error if `self` is
    /// not a mapping.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, TypeMismatch> {
        match self {
            Self::Mapping(map) => Ok(map.get(key)),
            other => Err(other.mismatch(ValueKind::Mapping)),
        }
    }

    /// Looks up the element at `index` in a sequence.
    ///
    /// Returns `Ok(None)` if out of bounds, and an error if `self` is not
    /// a sequence.
    pub fn index(&self, index: usize) -> Result<Option<&Value>, TypeMismatch> {
        match self {
            Self::Sequence(items) => Ok(items.get(index)),
            other => Err(other.mismatch(ValueKind::Sequence)),
        }
    }

    /// Follows `segments`, chaining [`get`](Value::get) and [`index`](Value::index).
    ///
    /// Any miss, including a shape mismatch along the way, yields `None`.
    pub fn dig<'s, 'p: 's, I>(&self, segments: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'s Segment<'p>>,
    {
        let mut current = self;
        for segment in segments {
            current = current.step(segment)?;
        }
        Some(current)
    }

    /// Parses `path` and follows it, see [`dig`](Value::dig).
    ///
    /// An unparsable path never resolves.
    pub fn dig_str(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for segment in PathParser::new(path) {
            current = current.step(&segment.ok()?)?;
        }
        Some(current)
    }

    fn step(&self, segment: &Segment<'_>) -> Option<&Value> {
        match (segment, self) {
            (Segment::Key(key), Self::Mapping(map)) => map.get(key),
            (Segment::Index(index), Self::Sequence(items)) => items.get(*index),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Typed coercions

    #[inline]
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match *self {
            Self::Bool(v) => Ok(v),
            ref other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    /// Returns the integer payload. Floats are not narrowed.
    #[inline]
    pub fn as_int(&self) -> Result<i64, TypeMismatch> {
        match *self {
            Self::Int(v) => Ok(v),
            ref other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    /// Returns the float payload, widening integers.
    #[inline]
    pub fn as_f64(&self) -> Result<f64, TypeMismatch> {
        match *self {
            Self::Float(v) => Ok(v),
            Self::Int(v) => Ok(v as f64),
            ref other => Err(other.mismatch(ValueKind::Float)),
        }
    }

    #[inline]
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Self::String(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    /// Same as [`as_str`](Value::as_str) but copies the string.
    #[inline]
    pub fn as_string(&self) -> Result<String, TypeMismatch> {
        self.as_str().map(ToOwned::to_owned)
    }

    #[inline]
    pub fn as_sequence(&self) -> Result<&[Value], TypeMismatch> {
        match self {
            Self::Sequence(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Sequence)),
        }
    }

    #[inline]
    pub fn as_mapping(&self) -> Result<&Mapping, TypeMismatch> {
        match self {
            Self::Mapping(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Mapping)),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Value {
    #[inline]
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Tests
