use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt;

use thiserror::Error;
use vc_value::TypeMismatch;

use crate::version::VersionParseError;

// -----------------------------------------------------------------------------
// Error

/// The error type for every (de)serialization call.
///
/// All errors are terminal for the call that raised them: there are no
/// retries and no partial results.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    RequiredField(#[from] RequiredFieldError),

    #[error("{source} at `{}`", display_path(.path))]
    TypeMismatch { source: TypeMismatch, path: String },

    #[error("invalid value at `{}`: expected {expected}, found {found}", display_path(.path))]
    InvalidValue {
        expected: Cow<'static, str>,
        found: String,
        path: String,
    },

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error(transparent)]
    CustomOrder(#[from] CustomOrderError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("`{type_path}` provided no value for property `{property}`")]
    MissingPropertyValue {
        type_path: &'static str,
        property: Cow<'static, str>,
    },

    #[error(transparent)]
    VersionParse(#[from] VersionParseError),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an [`Error::Custom`], mostly for converters.
    #[inline]
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

#[inline]
fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

// -----------------------------------------------------------------------------
// RequiredFieldError

/// Why a required property could not be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingReason {
    /// No candidate key was present in the document.
    Missing,
    /// A key was present but held an explicit null.
    Null,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Missing => "missing",
            Self::Null => "null",
        })
    }
}

/// A non-nilable property without default found neither a value nor, for
/// nilable fields, an explicit null.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("required property `{path}` of `{type_path}` is {reason}")]
pub struct RequiredFieldError {
    pub type_path: &'static str,
    /// Internal name of the property.
    pub property: Cow<'static, str>,
    /// Document path of the property, e.g. `address.street`.
    pub path: String,
    pub reason: MissingReason,
}

// -----------------------------------------------------------------------------
// UnsupportedFormatError

/// A format tag that is unknown, or whose codec was compiled out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnsupportedFormatError {
    #[error("unknown format `{0}`")]
    Unknown(String),

    #[error("format `{0}` requires the `{0}` feature")]
    Disabled(&'static str),
}

// -----------------------------------------------------------------------------
// CustomOrderError

/// A custom property order that does not list every serializable property
/// exactly once.
///
/// Raised when an [`ObjectInfo`](crate::info::ObjectInfo) is built, so for
/// types with a static descriptor it is a configuration error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CustomOrderError {
    #[error("custom order of `{type_path}` names unknown property `{name}`")]
    UnknownProperty {
        type_path: &'static str,
        name: Cow<'static, str>,
    },

    #[error("custom order of `{type_path}` does not list property `{name}`")]
    MissingProperty {
        type_path: &'static str,
        name: Cow<'static, str>,
    },

    #[error("custom order of `{type_path}` lists property `{name}` more than once")]
    DuplicateProperty {
        type_path: &'static str,
        name: Cow<'static, str>,
    },
}

impl CustomOrderError {
    #[cold]
    #[inline(never)]
    pub fn handle_error(&self) -> ! {
        panic!("{self}");
    }
}

// -----------------------------------------------------------------------------
// FormatError

/// The text codec of a format failed to encode or decode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{format} codec error: {message}")]
pub struct FormatError {
    pub format: &'static str,
    pub message: String,
}

impl FormatError {
    #[inline]
    pub fn new(format: &'static str, message: impl fmt::Display) -> Self {
        Self {
            format,
            message: message.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::{String, ToString};

    use vc_value::{TypeMismatch, ValueKind};

    use super::{Error, MissingReason, RequiredFieldError};

    #[test]
    fn messages() {
        let err = Error::TypeMismatch {
            source: TypeMismatch::new(ValueKind::Int, ValueKind::String),
            path: String::from("items[2].count"),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected int, found string at `items[2].count`"
        );

        let err = Error::from(RequiredFieldError {
            type_path: "app::User",
            property: Cow::Borrowed("id"),
            path: String::from("id"),
            reason: MissingReason::Null,
        });
        assert_eq!(err.to_string(), "required property `id` of `app::User` is null");

        let err = Error::InvalidValue {
            expected: Cow::Borrowed("u8"),
            found: String::from("300"),
            path: String::new(),
        };
        assert!(err.to_string().contains("<root>"));
    }
}
