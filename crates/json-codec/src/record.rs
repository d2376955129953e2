//! Records: fixed-shape values described by an explicit field table.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{json_kind, DecodeError, EncodeError};
use crate::json_type::JsonType;
use crate::scope::Scope;
use crate::shape::Shape;

type EncodeFn<R> = Box<dyn Fn(&R, &mut Scope) -> Result<Value, EncodeError> + Send + Sync>;
type DecodeFn<R> =
    Box<dyn Fn(&mut R, &Value, &mut Scope) -> Result<(), DecodeError> + Send + Sync>;

/// A plain data type mapped to a JSON object.
///
/// Implementors list their fields in the order they should appear in
/// encoded text. Decoding starts from `Default::default()`, so absent keys
/// keep their default value.
///
/// # Example
///
/// ```
/// use json_codec::{Codec, Field, Record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Record for User {
///     const NAME: &'static str = "User";
///
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::new("name", |u: &User| &u.name, |u: &mut User| &mut u.name),
///             Field::new("age", |u: &User| &u.age, |u: &mut User| &mut u.age),
///         ]
///     }
/// }
///
/// let codec = Codec::new();
/// let text = codec.encode(&User { name: "zhangsan".into(), age: 18 }).unwrap();
/// assert_eq!(text, r#"{"name":"zhangsan","age":18}"#);
/// ```
pub trait Record: Default + 'static {
    /// Type name used in shape descriptions.
    const NAME: &'static str;

    fn fields() -> Vec<Field<Self>>;
}

/// One entry of a record's field table.
pub struct Field<R> {
    name: &'static str,
    shape: fn() -> Shape,
    encode: EncodeFn<R>,
    decode: DecodeFn<R>,
}

impl<R: 'static> Field<R> {
    /// Declares a field stored at `get`/`get_mut` under the JSON key `name`.
    pub fn new<T: JsonType + 'static>(
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        Self {
            name,
            shape: T::shape,
            encode: Box::new(move |record: &R, scope: &mut Scope| get(record).to_json(scope)),
            decode: Box::new(move |record: &mut R, value: &Value, scope: &mut Scope| {
                *get_mut(record) = T::from_json(value, scope)?;
                Ok(())
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("shape", &(self.shape)().to_string())
            .finish()
    }
}

pub(crate) fn encode_record<R: Record>(
    record: &R,
    scope: &mut Scope,
) -> Result<Value, EncodeError> {
    let mut object = Map::new();
    for field in R::fields() {
        let value = scope.nested(field.name, |scope| (field.encode)(record, scope))?;
        object.insert(field.name.to_string(), value);
    }
    Ok(Value::Object(object))
}

pub(crate) fn decode_record<R: Record>(value: &Value, scope: &mut Scope) -> Result<R, DecodeError> {
    let object = value.as_object().ok_or_else(|| DecodeError::ShapeMismatch {
        expected: format!("object for {}", R::NAME),
        found: json_kind(value),
        pointer: scope.pointer(),
    })?;
    let mut record = R::default();
    for field in R::fields() {
        // Absent keys keep the default; unknown keys are never looked at.
        if let Some(item) = object.get(field.name) {
            scope.nested(field.name, |scope| (field.decode)(&mut record, item, scope))?;
        }
    }
    Ok(record)
}
