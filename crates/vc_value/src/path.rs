//! Dotted/indexed paths into nested [`Value`](crate::Value)s.
//!
//! # Syntax
//!
//! - Key: `name` at the start of the path, `.name` anywhere, e.g. `meta.id`
//! - Index: `[Number]`, e.g. `tags[1]`
//!
//! Keys run until the next `.` or `[`, so they cannot contain either.
//!
//! # Examples
//!
//! ```
//! use vc_value::{Segment, ValuePath};
//!
//! let path = ValuePath::parse("meta.tags[1].label").unwrap();
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.segments()[2], Segment::Index(1));
//! assert_eq!(path.to_string(), "meta.tags[1].label");
//! ```

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Segment

/// A single step of a [`ValuePath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment<'a> {
    /// Look up a key in a mapping.
    Key(Cow<'a, str>),
    /// Look up an element in a sequence.
    Index(usize),
}

impl<'a> Segment<'a> {
    #[inline]
    pub const fn key(key: &'a str) -> Self {
        Self::Key(Cow::Borrowed(key))
    }

    #[inline]
    pub const fn index(index: usize) -> Self {
        Self::Index(index)
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Segment<'static> {
        match self {
            Self::Key(key) => Segment::Key(Cow::Owned(key.into_owned())),
            Self::Index(index) => Segment::Index(index),
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Error

/// A path string that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value path `{path}` at offset {offset}: {message}")]
pub struct PathParseError {
    /// Byte position in `path`.
    pub offset: usize,
    pub path: String,
    pub message: &'static str,
}

// -----------------------------------------------------------------------------
// Parser

/// Lazily parses a path string into [`Segment`]s borrowing from it.
///
/// The iterator stops after the first error.
#[derive(Debug, Clone)]
pub struct PathParser<'a> {
    path: &'a str,
    offset: usize,
    failed: bool,
}

impl<'a> PathParser<'a> {
    #[inline]
    pub const fn new(path: &'a str) -> Self {
        Self {
            path,
            offset: 0,
            failed: false,
        }
    }

    fn error(&self, offset: usize, message: &'static str) -> PathParseError {
        PathParseError {
            offset,
            path: self.path.to_string(),
            message,
        }
    }

    fn parse_key(&mut self) -> Result<Segment<'a>, PathParseError> {
        let path: &'a str = self.path;
        let rest = &path[self.offset..];
        let end = rest.find(['.', '[']).unwrap_or(rest.len());
        if end == 0 {
            return Err(self.error(self.offset, "empty key"));
        }
        self.offset += end;
        Ok(Segment::Key(Cow::Borrowed(&rest[..end])))
    }

    fn parse_index(&mut self) -> Result<Segment<'a>, PathParseError> {
        let path: &'a str = self.path;
        let start = self.offset + 1;
        let rest = &path[start..];
        let Some(close) = rest.find(']') else {
            return Err(self.error(self.offset, "unclosed `[`"));
        };
        let index = rest[..close]
            .parse::<usize>()
            .map_err(|_| self.error(start, "index is not a non-negative integer"))?;
        self.offset = start + close + 1;
        Ok(Segment::Index(index))
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<Segment<'a>, PathParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.path.len() {
            return None;
        }

        let result = match self.path.as_bytes()[self.offset] {
            b'[' => self.parse_index(),
            b'.' => {
                self.offset += 1;
                self.parse_key()
            }
            _ if self.offset == 0 => self.parse_key(),
            _ => Err(self.error(self.offset, "expected `.` or `[`")),
        };

        self.failed = result.is_err();
        Some(result)
    }
}

// -----------------------------------------------------------------------------
// ValuePath

/// A parsed, reusable path, a thin wrapper over `Box<[Segment]>`.
///
/// Parse once, then hand it to [`Value::dig`](crate::Value::dig) as often as needed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ValuePath(Box<[Segment<'static>]>);

impl ValuePath {
    /// Parses `path`, copying key names.
    pub fn parse(path: &str) -> Result<Self, PathParseError> {
        PathParser::new(path)
            .map(|segment| segment.map(Segment::into_owned))
            .collect::<Result<Vec<_>, _>>()
            .map(|segments| Self(segments.into_boxed_slice()))
    }

    /// Builds a path from already-split segments.
    #[inline]
    pub fn from_segments(segments: impl IntoIterator<Item = Segment<'static>>) -> Self {
        Self(segments.into_iter().collect())
    }

    #[inline]
    pub fn segments(&self) -> &[Segment<'static>] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if index == 0 => f.write_str(key)?,
                other => fmt::Display::fmt(other, f)?,
            }
        }
        Ok(())
    }
}

impl core::str::FromStr for ValuePath {
    type Err = PathParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{PathParser, Segment, ValuePath};

    #[test]
    fn parse_mixed() {
        let segments: Vec<_> = PathParser::new(".a.b[10][2].c")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            segments,
            [
                Segment::key("a"),
                Segment::key("b"),
                Segment::index(10),
                Segment::index(2),
                Segment::key("c"),
            ]
        );
    }

    #[test]
    fn parse_errors() {
        let err = ValuePath::parse("a..b").unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.message, "empty key");

        let err = ValuePath::parse("a[1").unwrap_err();
        assert_eq!(err.offset, 1);

        let err = ValuePath::parse("a[x]").unwrap_err();
        assert_eq!(err.offset, 2);

        let err = ValuePath::parse("a[0]b").unwrap_err();
        assert_eq!(err.message, "expected `.` or `[`");
    }

    #[test]
    fn display_round_trip() {
        let path = ValuePath::parse("[0].name").unwrap();
        assert_eq!(path.to_string(), "[0].name");

        let path: ValuePath = "user.emails[3]".parse().unwrap();
        assert_eq!(path.to_string(), "user.emails[3]");
        assert!(ValuePath::parse("").unwrap().is_empty());
    }
}
