use vc_value::{TypeMismatch, Value, ValueKind};

use super::{DeserializationVisitor, SerializationVisitor, ValueBuilder};

/// Serialization visitor for JSON.
///
/// JSON has no NaN or infinities, they are written as null.
#[derive(Debug, Default)]
pub struct JsonSerializationVisitor {
    builder: ValueBuilder,
}

impl JsonSerializationVisitor {
    #[inline]
    pub const fn new() -> Self {
        Self {
            builder: ValueBuilder::new(),
        }
    }
}

impl SerializationVisitor for JsonSerializationVisitor {
    #[inline]
    fn builder(&mut self) -> &mut ValueBuilder {
        &mut self.builder
    }

    #[inline]
    fn visit_float(&mut self, value: f64) -> Value {
        if value.is_finite() {
            Value::Float(value)
        } else {
            Value::Null
        }
    }
}

/// Deserialization visitor for JSON.
///
/// JSON numbers carry no int/float distinction, so integral floats such as
/// `3.0` are accepted where an integer is expected.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDeserializationVisitor;

// 2^63, the first float past i64::MAX.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl DeserializationVisitor for JsonDeserializationVisitor {
    fn read_int(&self, data: &Value) -> Result<i64, TypeMismatch> {
        match *data {
            Value::Int(v) => Ok(v),
            Value::Float(v) if (-I64_BOUND..I64_BOUND).contains(&v) && (v as i64) as f64 == v => {
                Ok(v as i64)
            }
            ref other => Err(TypeMismatch::new(ValueKind::Int, other.kind())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_value::{TypeMismatch, Value, ValueKind};

    use super::{JsonDeserializationVisitor, JsonSerializationVisitor};
    use crate::visitor::{DeserializationVisitor, SerializationVisitor};

    #[test]
    fn non_finite_floats_are_null() {
        let mut visitor = JsonSerializationVisitor::new();
        assert_eq!(visitor.visit_float(f64::NAN), Value::Null);
        assert_eq!(visitor.visit_float(f64::NEG_INFINITY), Value::Null);
        assert_eq!(visitor.visit_float(0.5), Value::Float(0.5));
    }

    #[test]
    fn integral_floats_read_as_int() {
        let visitor = JsonDeserializationVisitor;
        assert_eq!(visitor.read_int(&Value::Float(3.0)), Ok(3));
        assert_eq!(
            visitor.read_int(&Value::Float(3.5)),
            Err(TypeMismatch::new(ValueKind::Int, ValueKind::Float))
        );
        assert!(visitor.read_int(&Value::Float(1e19)).is_err());
        assert!(visitor.read_string(&Value::Int(1)).is_err());
    }
}
