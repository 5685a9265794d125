use alloc::borrow::Cow;
use alloc::string::ToString;

use vc_value::{TypeMismatch, Value, ValueKind};

use super::{DeserializationVisitor, SerializationVisitor, ValueBuilder};
use crate::DeserializationContext;

/// Hint key: set to `false` to stop [`YamlDeserializationVisitor`] from
/// reading bool and number scalars as strings.
pub const YAML_COERCE_SCALARS: &str = "yaml.coerce_scalars";

/// Serialization visitor for YAML. YAML represents every float, including
/// `.nan` and `.inf`, so all defaults apply.
#[derive(Debug, Default)]
pub struct YamlSerializationVisitor {
    builder: ValueBuilder,
}

impl YamlSerializationVisitor {
    #[inline]
    pub const fn new() -> Self {
        Self {
            builder: ValueBuilder::new(),
        }
    }
}

impl SerializationVisitor for YamlSerializationVisitor {
    #[inline]
    fn builder(&mut self) -> &mut ValueBuilder {
        &mut self.builder
    }
}

/// Deserialization visitor for YAML.
///
/// Plain YAML scalars are typed by their spelling, so `version: 1.10`
/// decodes as a float. Where a string is expected such scalars are
/// accepted and re-spelled, unless coercion is turned off.
#[derive(Debug, Clone, Copy)]
pub struct YamlDeserializationVisitor {
    coerce_scalars: bool,
}

impl YamlDeserializationVisitor {
    #[inline]
    pub const fn new(coerce_scalars: bool) -> Self {
        Self { coerce_scalars }
    }

    /// Reads [`YAML_COERCE_SCALARS`] from the context, defaulting to `true`.
    pub fn from_context(context: &DeserializationContext) -> Self {
        let coerce_scalars = context
            .hint(YAML_COERCE_SCALARS)
            .and_then(|hint| hint.as_bool().ok())
            .unwrap_or(true);
        Self::new(coerce_scalars)
    }

    #[inline]
    pub const fn coerce_scalars(&self) -> bool {
        self.coerce_scalars
    }
}

impl Default for YamlDeserializationVisitor {
    #[inline]
    fn default() -> Self {
        Self::new(true)
    }
}

impl DeserializationVisitor for YamlDeserializationVisitor {
    fn read_string<'v>(&self, data: &'v Value) -> Result<Cow<'v, str>, TypeMismatch> {
        match data {
            Value::String(s) => Ok(Cow::Borrowed(s)),
            Value::Bool(v) if self.coerce_scalars => Ok(Cow::Owned(v.to_string())),
            Value::Int(v) if self.coerce_scalars => Ok(Cow::Owned(v.to_string())),
            Value::Float(v) if self.coerce_scalars => Ok(Cow::Owned(v.to_string())),
            other => Err(TypeMismatch::new(ValueKind::String, other.kind())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use vc_value::Value;

    use super::{YAML_COERCE_SCALARS, YamlDeserializationVisitor};
    use crate::DeserializationContext;
    use crate::visitor::DeserializationVisitor;

    #[test]
    fn coerces_scalars_by_default() {
        let ctx = DeserializationContext::new();
        let visitor = YamlDeserializationVisitor::from_context(&ctx);
        assert_eq!(visitor.read_string(&Value::Int(42)).unwrap(), "42");
        assert_eq!(visitor.read_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(visitor.read_string(&Value::Float(1.5)).unwrap(), "1.5");
        assert!(visitor.read_string(&Value::Null).is_err());
    }

    #[test]
    fn hint_disables_coercion() {
        let ctx = DeserializationContext::new().with_hint(YAML_COERCE_SCALARS, false);
        let visitor = YamlDeserializationVisitor::from_context(&ctx);
        assert!(!visitor.coerce_scalars());
        assert!(visitor.read_string(&Value::Int(42)).is_err());
        assert_eq!(visitor.read_string(&Value::from("x")).unwrap(), "x");
    }
}
