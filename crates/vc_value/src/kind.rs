use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ValueKind

/// The variant tag of a [`Value`](crate::Value), without its payload.
///
/// Mostly used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Returns a lowercase name of the kind, e.g. `"mapping"`.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }

    /// Returns `true` for `Sequence` and `Mapping`.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Sequence | Self::Mapping)
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Error

/// A [`Value`](crate::Value) was accessed as the wrong shape.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("type mismatch: expected {expected}, found {actual}")]
pub struct TypeMismatch {
    pub expected: ValueKind,
    pub actual: ValueKind,
}

impl TypeMismatch {
    #[inline]
    pub const fn new(expected: ValueKind, actual: ValueKind) -> Self {
        Self { expected, actual }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{TypeMismatch, ValueKind};

    #[test]
    fn display() {
        let err = TypeMismatch::new(ValueKind::Mapping, ValueKind::Sequence);
        assert_eq!(
            err.to_string(),
            "type mismatch: expected mapping, found sequence"
        );
        assert!(ValueKind::Sequence.is_container());
        assert!(!ValueKind::String.is_container());
    }
}
