use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use vc_value::Value;

use crate::error::{FormatError, UnsupportedFormatError};
use crate::visitor::{
    DeserializationVisitor, JsonDeserializationVisitor, JsonSerializationVisitor,
    SerializationVisitor, YamlDeserializationVisitor, YamlSerializationVisitor,
};
use crate::{DeserializationContext, Error};

// -----------------------------------------------------------------------------
// Format

/// A supported text format.
///
/// Each format pairs a visitor pair with a text codec. The codecs are
/// behind the `json` and `yaml` features; with a codec compiled out,
/// [`encode`](Self::encode) and [`decode`](Self::decode) fail with
/// [`UnsupportedFormatError::Disabled`] while the visitors stay available.
///
/// # Examples
///
/// ```
/// use vc_serializer::Format;
///
/// assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
/// assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
/// assert!("xml".parse::<Format>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// A fresh serialization visitor for one call.
    pub fn serialization_visitor(self) -> Box<dyn SerializationVisitor> {
        match self {
            Self::Json => Box::new(JsonSerializationVisitor::new()),
            Self::Yaml => Box::new(YamlSerializationVisitor::new()),
        }
    }

    /// The deserialization visitor for one call, configured by the
    /// context's hints.
    pub fn deserialization_visitor(
        self,
        context: &DeserializationContext,
    ) -> Box<dyn DeserializationVisitor> {
        match self {
            Self::Json => Box::new(JsonDeserializationVisitor),
            Self::Yaml => Box::new(YamlDeserializationVisitor::from_context(context)),
        }
    }

    /// Writes `value` as compact text.
    pub fn encode(self, value: &Value) -> Result<String, Error> {
        match self {
            Self::Json => encode_json(value),
            Self::Yaml => encode_yaml(value),
        }
    }

    /// Parses `text` into a value tree.
    pub fn decode(self, text: &str) -> Result<Value, Error> {
        match self {
            Self::Json => decode_json(text),
            Self::Yaml => decode_yaml(text),
        }
    }
}

impl fmt::Display for Format {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if s.eq_ignore_ascii_case("yaml") || s.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else {
            Err(UnsupportedFormatError::Unknown(s.to_string()))
        }
    }
}

// -----------------------------------------------------------------------------
// Codecs

#[cfg(feature = "json")]
fn encode_json(value: &Value) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| FormatError::new("json", e).into())
}

#[cfg(feature = "json")]
fn decode_json(text: &str) -> Result<Value, Error> {
    serde_json::from_str(text).map_err(|e| FormatError::new("json", e).into())
}

#[cfg(not(feature = "json"))]
fn encode_json(_: &Value) -> Result<String, Error> {
    Err(UnsupportedFormatError::Disabled("json").into())
}

#[cfg(not(feature = "json"))]
fn decode_json(_: &str) -> Result<Value, Error> {
    Err(UnsupportedFormatError::Disabled("json").into())
}

#[cfg(feature = "yaml")]
fn encode_yaml(value: &Value) -> Result<String, Error> {
    serde_yaml::to_string(value).map_err(|e| FormatError::new("yaml", e).into())
}

#[cfg(feature = "yaml")]
fn decode_yaml(text: &str) -> Result<Value, Error> {
    serde_yaml::from_str(text).map_err(|e| FormatError::new("yaml", e).into())
}

#[cfg(not(feature = "yaml"))]
fn encode_yaml(_: &Value) -> Result<String, Error> {
    Err(UnsupportedFormatError::Disabled("yaml").into())
}

#[cfg(not(feature = "yaml"))]
fn decode_yaml(_: &str) -> Result<Value, Error> {
    Err(UnsupportedFormatError::Disabled("yaml").into())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Format;
    use crate::error::UnsupportedFormatError;

    #[test]
    fn parse_names() {
        assert_eq!("Yaml".parse::<Format>(), Ok(Format::Yaml));
        assert_eq!(
            "toml".parse::<Format>(),
            Err(UnsupportedFormatError::Unknown("toml".into()))
        );
        assert_eq!(Format::Json.name(), "json");
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_codec() {
        use vc_value::{Mapping, Value};

        let value = Format::Json.decode(r#"{"b":1,"a":[true,null]}"#).unwrap();
        let keys: alloc::vec::Vec<_> = value.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(Format::Json.encode(&value).unwrap(), r#"{"b":1,"a":[true,null]}"#);

        let mut map = Mapping::new();
        map.insert("x", 1.5);
        assert_eq!(Format::Json.encode(&Value::Mapping(map)).unwrap(), r#"{"x":1.5}"#);

        assert!(matches!(Format::Json.decode("{"), Err(crate::Error::Format(_))));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_codec() {
        let value = Format::Yaml.decode("name: x\nsize: 3\n").unwrap();
        assert_eq!(value.dig_str("size").and_then(|v| v.as_int().ok()), Some(3));
        assert_eq!(Format::Yaml.encode(&value).unwrap(), "name: x\nsize: 3\n");
    }
}
