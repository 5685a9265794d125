//! Per-format shaping and extraction.
//!
//! Navigators never build or inspect [`Value`]s themselves, they go
//! through a visitor pair:
//!
//! - [`SerializationVisitor`] turns scalars into values and assembles
//!   objects and arrays. Nesting is tracked by a [`ValueBuilder`] frame
//!   stack, so a property's value may itself be an object begun and ended
//!   while the parent object is still open.
//! - [`DeserializationVisitor`] pulls typed scalars and containers back out,
//!   failing with [`TypeMismatch`] on the wrong shape.
//!
//! Formats differ only at the edges: JSON has no representation for
//! non-finite floats, YAML documents often hold unquoted scalars where
//! strings are expected. Text encoding happens later, on the finished
//! value tree.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod json;
mod yaml;

// -----------------------------------------------------------------------------
// Exports

pub use builder::ValueBuilder;
pub use json::{JsonDeserializationVisitor, JsonSerializationVisitor};
pub use yaml::{YAML_COERCE_SCALARS, YamlDeserializationVisitor, YamlSerializationVisitor};

use alloc::borrow::Cow;

use vc_value::{Mapping, TypeMismatch, Value};

// -----------------------------------------------------------------------------
// SerializationVisitor

/// Shapes the value tree during serialization.
///
/// Only [`builder`](Self::builder) is required, every other method has a
/// default that produces the plain value.
pub trait SerializationVisitor {
    /// The frame stack for objects and arrays under construction.
    fn builder(&mut self) -> &mut ValueBuilder;

    #[inline]
    fn visit_null(&mut self) -> Value {
        Value::Null
    }

    #[inline]
    fn visit_bool(&mut self, value: bool) -> Value {
        Value::Bool(value)
    }

    #[inline]
    fn visit_int(&mut self, value: i64) -> Value {
        Value::Int(value)
    }

    #[inline]
    fn visit_float(&mut self, value: f64) -> Value {
        Value::Float(value)
    }

    #[inline]
    fn visit_string(&mut self, value: &str) -> Value {
        Value::String(value.into())
    }

    #[inline]
    fn begin_object(&mut self) {
        self.builder().begin_object();
    }

    #[inline]
    fn add_property(&mut self, name: &str, value: Value) {
        self.builder().add_property(name, value);
    }

    #[inline]
    fn end_object(&mut self) -> Value {
        self.builder().end_object()
    }

    #[inline]
    fn begin_array(&mut self) {
        self.builder().begin_array();
    }

    #[inline]
    fn add_element(&mut self, value: Value) {
        self.builder().add_element(value);
    }

    #[inline]
    fn end_array(&mut self) -> Value {
        self.builder().end_array()
    }
}

// -----------------------------------------------------------------------------
// DeserializationVisitor

/// Extracts typed data from value nodes during deserialization.
///
/// The defaults accept exactly the matching variant, with integers widened
/// to floats.
pub trait DeserializationVisitor {
    #[inline]
    fn read_bool(&self, data: &Value) -> Result<bool, TypeMismatch> {
        data.as_bool()
    }

    #[inline]
    fn read_int(&self, data: &Value) -> Result<i64, TypeMismatch> {
        data.as_int()
    }

    #[inline]
    fn read_float(&self, data: &Value) -> Result<f64, TypeMismatch> {
        data.as_f64()
    }

    #[inline]
    fn read_string<'v>(&self, data: &'v Value) -> Result<Cow<'v, str>, TypeMismatch> {
        data.as_str().map(Cow::Borrowed)
    }

    #[inline]
    fn read_sequence<'v>(&self, data: &'v Value) -> Result<&'v [Value], TypeMismatch> {
        data.as_sequence()
    }

    #[inline]
    fn read_mapping<'v>(&self, data: &'v Value) -> Result<&'v Mapping, TypeMismatch> {
        data.as_mapping()
    }
}
