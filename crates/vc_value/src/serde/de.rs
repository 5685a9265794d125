use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::{Mapping, Value};

// -----------------------------------------------------------------------------
// Value

/// A [`Visitor`] accepting any self-described node.
struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any document value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Float(v as f64),
        })
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        MappingVisitor.visit_map(map).map(Value::Mapping)
    }
}

impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// Mapping

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = Mapping;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a mapping")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Mapping, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(MapKey(key)) = map.next_key::<MapKey>()? {
            let value = map.next_value::<Value>()?;
            mapping.insert(key, value);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for Mapping {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

// -----------------------------------------------------------------------------
// Keys

/// A mapping key. Scalar keys that are not strings (YAML allows
/// `1: one` or `true: yes`) are stringified.
struct MapKey(String);

struct MapKeyVisitor;

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a scalar mapping key")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<MapKey, E> {
        Ok(MapKey(String::from("null")))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{Mapping, Value};

    #[test]
    fn json_preserves_key_order() {
        let doc: Value = serde_json::from_str(r#"{"z": 1, "a": [true, null, 2.5], "m": "s"}"#).unwrap();
        let map = doc.as_mapping().unwrap();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(
            map.get("a"),
            Some(&Value::Sequence(vec![Value::Bool(true), Value::Null, Value::Float(2.5)]))
        );

        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"z":1,"a":[true,null,2.5],"m":"s"}"#
        );
    }

    #[test]
    fn large_unsigned_becomes_float() {
        let doc: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(doc, Value::Float(u64::MAX as f64));
        let doc: Value = serde_json::from_str("42").unwrap();
        assert_eq!(doc, Value::Int(42));
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let doc: Value = serde_yaml::from_str("1: one\ntrue: yes\nname: x\n").unwrap();
        let expected: Mapping = [("1", "one"), ("true", "yes"), ("name", "x")]
            .into_iter()
            .collect();
        assert_eq!(doc, Value::Mapping(expected));
        assert!(serde_yaml::to_string(&doc).unwrap().contains("name: x"));
    }
}
