//! The codec facade.

use serde_json::Value;

use crate::conform::conform;
use crate::error::{DecodeError, EncodeError};
use crate::json_type::JsonType;
use crate::options::CodecOptions;
use crate::parse::parse;
use crate::record::Record;
use crate::scope::Scope;
use crate::shape::TypeDescriptor;

/// Converts between Rust values and JSON text.
///
/// A `Codec` holds nothing but its options. It is `Copy`, needs no setup or
/// teardown, and can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn scope(&self) -> Scope {
        Scope::new(&self.options)
    }

    /// Encodes a record, a sequence of records, or any other [`JsonType`].
    ///
    /// Record fields appear in declaration order.
    pub fn encode<T: JsonType>(&self, value: &T) -> Result<String, EncodeError> {
        let tree = self.to_value(value)?;
        let text = if self.options.pretty {
            serde_json::to_string_pretty(&tree)
        } else {
            serde_json::to_string(&tree)
        };
        text.map_err(|e| EncodeError::Serialize(e.to_string()))
    }

    /// Encodes into a JSON tree instead of text.
    pub fn to_value<T: JsonType>(&self, value: &T) -> Result<Value, EncodeError> {
        value.to_json(&mut self.scope())
    }

    /// Decodes one record from a JSON object.
    pub fn decode_one<R: Record>(&self, text: &str) -> Result<R, DecodeError> {
        self.decode_shape(text)
    }

    /// Decodes an ordered sequence of records from a JSON array.
    pub fn decode_sequence<R: Record>(&self, text: &str) -> Result<Vec<R>, DecodeError> {
        self.decode_shape(text)
    }

    /// Decodes into any statically declared shape, e.g. `Vec<Vec<User>>` or
    /// `BTreeMap<String, User>`.
    pub fn decode_shape<T: JsonType>(&self, text: &str) -> Result<T, DecodeError> {
        let tree = parse(text, self.options.max_depth)?;
        self.from_value(&tree)
    }

    /// Decodes from an already parsed JSON tree.
    pub fn from_value<T: JsonType>(&self, value: &Value) -> Result<T, DecodeError> {
        T::from_json(value, &mut self.scope())
    }

    /// Decodes against a runtime descriptor and returns the normalized tree.
    ///
    /// Records come back with exactly their declared fields, in declaration
    /// order; absent fields hold the zero value of their shape.
    pub fn decode(&self, text: &str, target: &TypeDescriptor) -> Result<Value, DecodeError> {
        let tree = parse(text, self.options.max_depth)?;
        conform(&tree, &target.shape(), &mut self.scope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Record for Point {
        const NAME: &'static str = "Point";

        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new("x", |p: &Point| &p.x, |p: &mut Point| &mut p.x),
                Field::new("y", |p: &Point| &p.y, |p: &mut Point| &mut p.y),
            ]
        }
    }

    #[test]
    fn pretty_output_is_indented() {
        let codec = Codec::with_options(CodecOptions::new().pretty(true));
        let text = codec.encode(&Point { x: 1, y: -2 }).unwrap();
        assert_eq!(text, "{\n  \"x\": 1,\n  \"y\": -2\n}");
    }

    #[test]
    fn syntax_errors_surface_before_shape_checks() {
        let codec = Codec::new();
        assert!(matches!(
            codec.decode_one::<Point>("{\"x\": 1,"),
            Err(DecodeError::Syntax { .. })
        ));
        assert!(matches!(
            codec.decode("[1, 2", &TypeDescriptor::sequence_of::<Point>()),
            Err(DecodeError::Syntax { .. })
        ));
        assert!(matches!(
            codec.decode_one::<Point>(""),
            Err(DecodeError::Syntax { .. })
        ));
    }

    #[test]
    fn depth_limit_applies_to_encode_and_decode() {
        let codec = Codec::with_options(CodecOptions::new().max_depth(1));
        let nested = vec![vec![Point::default()]];
        assert!(matches!(codec.encode(&nested), Err(EncodeError::Depth(_))));
        assert!(matches!(
            codec.decode_shape::<Vec<Point>>(r#"[{"x": 1}]"#),
            Err(DecodeError::Depth(_))
        ));
        assert_eq!(
            codec.decode_shape::<Vec<u8>>("[1, 2]").unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn depth_limit_can_be_raised_past_the_parser_default() {
        let text = format!("{}null{}", "[".repeat(200), "]".repeat(200));

        let deep = Codec::with_options(CodecOptions::new().max_depth(1000));
        let tree = deep.decode_shape::<Value>(&text).unwrap();
        assert_eq!(deep.encode(&tree).unwrap(), text);
        assert!(deep.decode(&text, &TypeDescriptor::composite::<Value>()).is_ok());

        let default = Codec::new();
        assert!(matches!(
            default.decode_shape::<Value>(&text),
            Err(DecodeError::Depth(_))
        ));
        assert!(matches!(default.encode(&tree), Err(EncodeError::Depth(_))));
    }
}
