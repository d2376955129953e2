//! Descriptor-driven decoding.
//!
//! Walks a parsed JSON value against a [`Shape`] and produces the normalized
//! value: records contain exactly their declared fields in declaration order,
//! absent fields hold the zero value of their shape, unknown keys are dropped.
//! The coercion rules are the ones the typed [`JsonType`](crate::JsonType)
//! impls apply, so both paths accept and reject the same input.

use serde_json::{Map, Number, Value};

use crate::error::{json_kind, DecodeError};
use crate::json_type::{copy_any, read_float, read_integer, shape_mismatch, type_mismatch};
use crate::scope::Scope;
use crate::shape::{RecordShape, Shape};

/// Checks `value` against `shape` and returns its normalized form.
pub fn conform(value: &Value, shape: &Shape, scope: &mut Scope) -> Result<Value, DecodeError> {
    match shape {
        Shape::Any => copy_any(value, scope),
        Shape::Bool => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(type_mismatch(shape, value, scope)),
        },
        Shape::Int(kind) => {
            let n = read_integer(*kind, value, scope)?;
            // Normalize `18.0` to `18`; the range check above covers u64/i64.
            Ok(match i64::try_from(n) {
                Ok(i) => Value::Number(Number::from(i)),
                Err(_) => Value::Number(Number::from(n as u64)),
            })
        }
        Shape::Float => {
            // `1` comes back as `1.0`, the way an `f64` field re-encodes it.
            let f = read_float(value, scope)?;
            Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| type_mismatch(shape, value, scope))
        }
        Shape::Str => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err(type_mismatch(shape, value, scope)),
        },
        Shape::Optional(inner) => {
            if value.is_null() {
                return Ok(Value::Null);
            }
            conform(value, inner, scope)
        }
        Shape::Seq(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| shape_mismatch(shape, value, scope))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(scope.nested(i.to_string(), |scope| conform(item, inner, scope))?);
            }
            Ok(Value::Array(out))
        }
        Shape::Map(inner) => {
            let object = value
                .as_object()
                .ok_or_else(|| shape_mismatch(shape, value, scope))?;
            let mut out = Map::new();
            for (key, item) in object {
                let conformed = scope.nested(key.as_str(), |scope| conform(item, inner, scope))?;
                out.insert(key.clone(), conformed);
            }
            Ok(Value::Object(out))
        }
        Shape::Record(record) => conform_record(value, record, scope),
    }
}

fn conform_record(
    value: &Value,
    record: &RecordShape,
    scope: &mut Scope,
) -> Result<Value, DecodeError> {
    let object = value.as_object().ok_or_else(|| DecodeError::ShapeMismatch {
        expected: format!("object for {}", record.name),
        found: json_kind(value),
        pointer: scope.pointer(),
    })?;
    let mut out = Map::new();
    for field in record.fields() {
        let conformed = match object.get(field.name) {
            Some(item) => scope.nested(field.name, |scope| conform(item, &field.shape, scope))?,
            None => zero_value(&field.shape),
        };
        out.insert(field.name.to_string(), conformed);
    }
    Ok(Value::Object(out))
}

/// The value an absent field of this shape takes.
pub fn zero_value(shape: &Shape) -> Value {
    match shape {
        Shape::Any | Shape::Optional(_) => Value::Null,
        Shape::Bool => Value::Bool(false),
        Shape::Int(_) => Value::Number(Number::from(0)),
        Shape::Float => Number::from_f64(0.0).map_or(Value::Null, Value::Number),
        Shape::Str => Value::String(String::new()),
        Shape::Seq(_) => Value::Array(Vec::new()),
        Shape::Map(_) => Value::Object(Map::new()),
        Shape::Record(record) => Value::Object(
            record
                .fields()
                .iter()
                .map(|field| (field.name.to_string(), zero_value(&field.shape)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CodecOptions;
    use crate::shape::IntKind;
    use serde_json::json;

    fn run(value: Value, shape: &Shape) -> Result<Value, DecodeError> {
        conform(&value, shape, &mut Scope::new(&CodecOptions::default()))
    }

    #[test]
    fn integral_floats_are_normalized() {
        assert_eq!(run(json!(18.0), &Shape::Int(IntKind::U32)).unwrap(), json!(18));
        assert_eq!(
            run(json!(u64::MAX), &Shape::Int(IntKind::U64)).unwrap(),
            json!(u64::MAX)
        );
    }

    #[test]
    fn integers_in_float_fields_become_floats() {
        assert_eq!(run(json!(1), &Shape::Float).unwrap(), json!(1.0));
        assert_eq!(run(json!(-0.25), &Shape::Float).unwrap(), json!(-0.25));
        let err = run(json!("1"), &Shape::Float).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { found: "string", .. }));
    }

    #[test]
    fn any_subtrees_count_towards_the_depth_limit() {
        let options = CodecOptions::new().max_depth(2);
        let shape = Shape::Seq(Box::new(Shape::Any));
        assert!(conform(&json!([[1]]), &shape, &mut Scope::new(&options)).is_ok());
        let err = conform(&json!([[[1]]]), &shape, &mut Scope::new(&options)).unwrap_err();
        assert!(matches!(err, DecodeError::Depth(_)));
        assert_eq!(err.pointer(), Some("/0/0/0"));
    }

    #[test]
    fn nested_sequences_keep_order() {
        let shape = Shape::Seq(Box::new(Shape::Seq(Box::new(Shape::Str))));
        assert_eq!(
            run(json!([["b", "a"], [], ["c"]]), &shape).unwrap(),
            json!([["b", "a"], [], ["c"]])
        );
    }

    #[test]
    fn map_values_are_checked() {
        let shape = Shape::Map(Box::new(Shape::Bool));
        let err = run(json!({"ok": true, "bad": 1}), &shape).unwrap_err();
        assert_eq!(err.pointer(), Some("/bad"));
    }

    #[test]
    fn zero_values_per_shape() {
        assert_eq!(zero_value(&Shape::Bool), json!(false));
        assert_eq!(zero_value(&Shape::Int(IntKind::I8)), json!(0));
        assert_eq!(zero_value(&Shape::Float), json!(0.0));
        assert_eq!(zero_value(&Shape::Str), json!(""));
        assert_eq!(zero_value(&Shape::Optional(Box::new(Shape::Str))), json!(null));
        assert_eq!(zero_value(&Shape::Seq(Box::new(Shape::Str))), json!([]));
        assert_eq!(zero_value(&Shape::Map(Box::new(Shape::Str))), json!({}));
    }
}
