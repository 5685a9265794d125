use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Version

/// A semantic version, `major.minor.patch[-pre][+build]`.
///
/// Ordering follows semver precedence: numeric fields first, then a
/// pre-release sorts below the release it precedes. Build metadata has no
/// precedence and is only compared last to keep `Ord` consistent with `Eq`,
/// see [`cmp_precedence`](Version::cmp_precedence).
///
/// # Examples
///
/// ```
/// use vc_serializer::Version;
///
/// let rc: Version = "2.0.0-rc.1".parse().unwrap();
/// let release = Version::new(2, 0, 0);
/// assert!(rc < release);
/// assert!(Version::new(1, 10, 0) > Version::new(1, 9, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pre: String,
    build: String,
}

impl Version {
    #[inline]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: String::new(),
            build: String::new(),
        }
    }

    /// Sets the pre-release part, without the leading `-`.
    #[inline]
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = pre.into();
        self
    }

    /// Sets the build metadata, without the leading `+`.
    #[inline]
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    #[inline]
    pub fn pre(&self) -> &str {
        &self.pre
    }

    #[inline]
    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let error = |message| VersionParseError {
            input: text.to_string(),
            message,
        };

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (text, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let mut numbers = core.split('.');
        let mut next = |name| -> Result<u64, VersionParseError> {
            let part = numbers.next().ok_or_else(|| error(name))?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(error(name));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(error("leading zero in numeric field"));
            }
            part.parse().map_err(|_| error("numeric field overflows u64"))
        };
        let major = next("invalid major version")?;
        let minor = next("invalid minor version")?;
        let patch = next("invalid patch version")?;
        if numbers.next().is_some() {
            return Err(error("unexpected fourth numeric field"));
        }

        let valid_ident = |s: &str| {
            !s.is_empty()
                && s.split('.').all(|id| {
                    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                })
        };
        if pre.is_some_and(|pre| !valid_ident(pre)) {
            return Err(error("invalid pre-release identifier"));
        }
        if build.is_some_and(|build| !valid_ident(build)) {
            return Err(error("invalid build metadata"));
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre: pre.unwrap_or_default().to_string(),
            build: build.unwrap_or_default().to_string(),
        })
    }

    /// Compares by semver precedence, ignoring build metadata.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| cmp_pre(&self.pre, &other.pre))
    }
}

fn cmp_pre(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let mut lhs = a.split('.');
    let mut rhs = b.split('.');
    loop {
        let ord = match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match (x.parse::<u64>(), y.parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => x.cmp(y),
            },
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_precedence(other)
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// -----------------------------------------------------------------------------
// Error

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid version `{input}`: {message}")]
pub struct VersionParseError {
    pub input: String,
    pub message: &'static str,
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::cmp::Ordering;

    use super::Version;

    #[test]
    fn parse_and_display() {
        let v = Version::parse("1.2.3-alpha.1+build.5").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert_eq!(v.pre(), "alpha.1");
        assert_eq!(v.build(), "build.5");
        assert_eq!(v.to_string(), "1.2.3-alpha.1+build.5");

        for bad in ["", "1", "1.2", "1.2.3.4", "01.2.3", "1.x.3", "1.2.3-", "1.2.3+a..b"] {
            assert!(Version::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn precedence() {
        let ordered = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
            "2.0.0",
            "2.1.0",
        ];
        for pair in ordered.windows(2) {
            let a: Version = pair[0].parse().unwrap();
            let b: Version = pair[1].parse().unwrap();
            assert!(a < b, "{a} < {b}");
        }

        let a = Version::parse("1.0.0+x").unwrap();
        let b = Version::parse("1.0.0+y").unwrap();
        assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
        assert_ne!(a, b);
    }
}
