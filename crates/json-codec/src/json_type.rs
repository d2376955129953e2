//! Compile-time mapping between Rust types and JSON values.
//!
//! Every type the codec can encode or decode implements [`JsonType`]:
//! scalars, `Option`, `Vec`, string-keyed maps, `serde_json::Value`, and every
//! [`Record`]. Nested generics such as `Vec<Vec<User>>` or
//! `BTreeMap<String, Option<User>>` compose from these impls, so the Rust type
//! itself is the decode target and no runtime type token is needed.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::error::{json_kind, DecodeError, DepthExceeded, EncodeError};
use crate::record::{decode_record, encode_record, Record};
use crate::scope::Scope;
use crate::shape::{IntKind, RecordShape, Shape};

pub trait JsonType: Sized {
    /// Runtime description of this type.
    fn shape() -> Shape;

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError>;

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError>;
}

impl<R: Record> JsonType for R {
    fn shape() -> Shape {
        Shape::Record(RecordShape::of::<R>())
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        encode_record(self, scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        decode_record(value, scope)
    }
}

pub(crate) fn type_mismatch(expected: &Shape, value: &Value, scope: &Scope) -> DecodeError {
    DecodeError::TypeMismatch {
        expected: expected.expects(),
        found: json_kind(value),
        pointer: scope.pointer(),
    }
}

pub(crate) fn shape_mismatch(expected: &Shape, value: &Value, scope: &Scope) -> DecodeError {
    DecodeError::ShapeMismatch {
        expected: expected.expects(),
        found: json_kind(value),
        pointer: scope.pointer(),
    }
}

// -------------------------------------------------------------------------
// Scalars

impl JsonType for String {
    fn shape() -> Shape {
        Shape::Str
    }

    fn to_json(&self, _scope: &mut Scope) -> Result<Value, EncodeError> {
        Ok(Value::String(self.clone()))
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(type_mismatch(&Shape::Str, value, scope)),
        }
    }
}

impl JsonType for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn to_json(&self, _scope: &mut Scope) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| type_mismatch(&Shape::Bool, value, scope))
    }
}

/// Reads an integer in `kind`'s range.
///
/// Integral floats such as `18.0` are accepted; fractional numbers are not.
pub(crate) fn read_integer(
    kind: IntKind,
    value: &Value,
    scope: &Scope,
) -> Result<i128, DecodeError> {
    let Value::Number(n) = value else {
        return Err(type_mismatch(&Shape::Int(kind), value, scope));
    };
    let integer = if let Some(i) = n.as_i64() {
        i128::from(i)
    } else if let Some(u) = n.as_u64() {
        i128::from(u)
    } else {
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => f as i128,
            _ => return Err(type_mismatch(&Shape::Int(kind), value, scope)),
        }
    };
    if !kind.contains(integer) {
        return Err(DecodeError::OutOfRange {
            expected: kind.name(),
            value: n.to_string(),
            pointer: scope.pointer(),
        });
    }
    Ok(integer)
}

macro_rules! impl_json_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl JsonType for $ty {
                fn shape() -> Shape {
                    Shape::Int(IntKind::$kind)
                }

                fn to_json(&self, _scope: &mut Scope) -> Result<Value, EncodeError> {
                    Ok(Value::Number(Number::from(*self)))
                }

                fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
                    let n = read_integer(IntKind::$kind, value, scope)?;
                    // In range, checked by read_integer.
                    Ok(n as $ty)
                }
            }
        )*
    };
}

impl_json_int! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

fn encode_float(f: f64, scope: &Scope) -> Result<Value, EncodeError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| EncodeError::NonFiniteNumber {
            pointer: scope.pointer(),
        })
}

pub(crate) fn read_float(value: &Value, scope: &Scope) -> Result<f64, DecodeError> {
    value
        .as_f64()
        .ok_or_else(|| type_mismatch(&Shape::Float, value, scope))
}

impl JsonType for f64 {
    fn shape() -> Shape {
        Shape::Float
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        encode_float(*self, scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        read_float(value, scope)
    }
}

impl JsonType for f32 {
    fn shape() -> Shape {
        Shape::Float
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        encode_float(f64::from(*self), scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        let f = read_float(value, scope)?;
        if f.abs() > f64::from(f32::MAX) {
            return Err(DecodeError::OutOfRange {
                expected: "f32",
                value: f.to_string(),
                pointer: scope.pointer(),
            });
        }
        Ok(f as f32)
    }
}

/// Copies an untyped tree, one [`Scope`] level per array element or object
/// member, so `Any` subtrees are held to the same depth limit as typed ones.
pub(crate) fn copy_any<E>(value: &Value, scope: &mut Scope) -> Result<Value, E>
where
    E: From<DepthExceeded>,
{
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(scope.nested(i.to_string(), |scope| copy_any::<E>(item, scope))?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(members) => {
            let mut out = Map::new();
            for (key, item) in members {
                let copied = scope.nested(key.as_str(), |scope| copy_any::<E>(item, scope))?;
                out.insert(key.clone(), copied);
            }
            Ok(Value::Object(out))
        }
        _ => Ok(value.clone()),
    }
}

impl JsonType for Value {
    fn shape() -> Shape {
        Shape::Any
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        copy_any(self, scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        copy_any(value, scope)
    }
}

// -------------------------------------------------------------------------
// Containers

impl<T: JsonType> JsonType for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        match self {
            Some(inner) => inner.to_json(scope),
            None => Ok(Value::Null),
        }
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_json(value, scope).map(Some)
    }
}

impl<T: JsonType> JsonType for Vec<T> {
    fn shape() -> Shape {
        Shape::Seq(Box::new(T::shape()))
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        let mut items = Vec::with_capacity(self.len());
        for (i, item) in self.iter().enumerate() {
            items.push(scope.nested(i.to_string(), |scope| item.to_json(scope))?);
        }
        Ok(Value::Array(items))
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| shape_mismatch(&Self::shape(), value, scope))?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            out.push(scope.nested(i.to_string(), |scope| T::from_json(item, scope))?);
        }
        Ok(out)
    }
}

fn encode_entries<'a, T: JsonType + 'a>(
    entries: impl Iterator<Item = (&'a String, &'a T)>,
    scope: &mut Scope,
) -> Result<Value, EncodeError> {
    let mut object = Map::new();
    for (key, item) in entries {
        let value = scope.nested(key.as_str(), |scope| item.to_json(scope))?;
        object.insert(key.clone(), value);
    }
    Ok(Value::Object(object))
}

fn decode_entries<T: JsonType>(
    value: &Value,
    scope: &mut Scope,
) -> Result<Vec<(String, T)>, DecodeError> {
    let object = value
        .as_object()
        .ok_or_else(|| shape_mismatch(&Shape::Map(Box::new(T::shape())), value, scope))?;
    let mut out = Vec::with_capacity(object.len());
    for (key, item) in object {
        let decoded = scope.nested(key.as_str(), |scope| T::from_json(item, scope))?;
        out.push((key.clone(), decoded));
    }
    Ok(out)
}

impl<T: JsonType> JsonType for BTreeMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(T::shape()))
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        encode_entries(self.iter(), scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        Ok(decode_entries(value, scope)?.into_iter().collect())
    }
}

impl<T: JsonType> JsonType for IndexMap<String, T> {
    fn shape() -> Shape {
        Shape::Map(Box::new(T::shape()))
    }

    fn to_json(&self, scope: &mut Scope) -> Result<Value, EncodeError> {
        encode_entries(self.iter(), scope)
    }

    fn from_json(value: &Value, scope: &mut Scope) -> Result<Self, DecodeError> {
        Ok(decode_entries(value, scope)?.into_iter().collect())
    }
}
