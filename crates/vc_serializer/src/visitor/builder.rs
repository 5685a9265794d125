use alloc::vec::Vec;

use vc_value::{Mapping, Value};

#[derive(Debug)]
enum Frame {
    Object(Mapping),
    Array(Vec<Value>),
}

/// A stack of objects and arrays under construction.
///
/// Mismatched calls, such as `end_array` while an object is open, are
/// navigator bugs. They are logged and produce `Null` instead of
/// corrupting the enclosing frame.
///
/// ```
/// use vc_serializer::visitor::ValueBuilder;
/// use vc_serializer::Value;
///
/// let mut builder = ValueBuilder::new();
/// builder.begin_object();
/// builder.begin_array();
/// builder.add_element(Value::Int(1));
/// let tags = builder.end_array();
/// builder.add_property("tags", tags);
/// let doc = builder.end_object();
///
/// assert_eq!(doc.dig_str("tags[0]"), Some(&Value::Int(1)));
/// assert_eq!(builder.depth(), 0);
/// ```
#[derive(Debug, Default)]
pub struct ValueBuilder {
    frames: Vec<Frame>,
}

impl ValueBuilder {
    #[inline]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn begin_object(&mut self) {
        self.frames.push(Frame::Object(Mapping::new()));
    }

    /// Records a property on the innermost object. Later values for the
    /// same name replace earlier ones in place.
    pub fn add_property(&mut self, name: &str, value: Value) {
        match self.frames.last_mut() {
            Some(Frame::Object(map)) => {
                map.insert(name, value);
            }
            _ => log::error!("ValueBuilder::add_property(`{name}`) without an open object"),
        }
    }

    pub fn end_object(&mut self) -> Value {
        match self.frames.pop() {
            Some(Frame::Object(map)) => Value::Mapping(map),
            other => self.unbalanced("end_object", other),
        }
    }

    #[inline]
    pub fn begin_array(&mut self) {
        self.frames.push(Frame::Array(Vec::new()));
    }

    pub fn add_element(&mut self, value: Value) {
        match self.frames.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            _ => log::error!("ValueBuilder::add_element without an open array"),
        }
    }

    pub fn end_array(&mut self) -> Value {
        match self.frames.pop() {
            Some(Frame::Array(items)) => Value::Sequence(items),
            other => self.unbalanced("end_array", other),
        }
    }

    #[cold]
    fn unbalanced(&mut self, call: &str, popped: Option<Frame>) -> Value {
        log::error!("ValueBuilder::{call} does not match the innermost frame");
        if let Some(frame) = popped {
            self.frames.push(frame);
        }
        Value::Null
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ValueBuilder;
    use vc_value::{Mapping, Value};

    #[test]
    fn nested_objects() {
        let mut builder = ValueBuilder::new();
        builder.begin_object();
        builder.add_property("a", Value::Int(1));
        builder.begin_object();
        builder.add_property("b", Value::Bool(true));
        let inner = builder.end_object();
        builder.add_property("inner", inner);
        builder.add_property("a", Value::Int(2));
        let doc = builder.end_object();

        let expected: Mapping = [
            ("a", Value::Int(2)),
            ("inner", Value::Mapping([("b", true)].into_iter().collect())),
        ]
        .into_iter()
        .collect();
        assert_eq!(doc, Value::Mapping(expected));
    }

    #[test]
    fn unbalanced_calls_keep_frames() {
        let mut builder = ValueBuilder::new();
        assert_eq!(builder.end_object(), Value::Null);

        builder.begin_object();
        assert_eq!(builder.end_array(), Value::Null);
        assert_eq!(builder.depth(), 1);
        builder.add_element(Value::Int(3));
        assert_eq!(builder.end_object(), Value::Mapping(Mapping::new()));
    }
}
