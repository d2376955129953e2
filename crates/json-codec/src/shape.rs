//! Runtime-visible descriptions of encode/decode targets.
//!
//! `Shape` is the recursive sum type of everything the codec can decode into.
//! `TypeDescriptor` is the top-level request: one record, a sequence of
//! records, or any composite shape.

use std::fmt;

use crate::json_type::JsonType;
use crate::record::Record;

/// Width of an integer field, with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    pub fn min(self) -> i128 {
        match self {
            Self::I8 => i8::MIN.into(),
            Self::I16 => i16::MIN.into(),
            Self::I32 => i32::MIN.into(),
            Self::I64 => i64::MIN.into(),
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => 0,
        }
    }

    pub fn max(self) -> i128 {
        match self {
            Self::I8 => i8::MAX.into(),
            Self::I16 => i16::MAX.into(),
            Self::I32 => i32::MAX.into(),
            Self::I64 => i64::MAX.into(),
            Self::U8 => u8::MAX.into(),
            Self::U16 => u16::MAX.into(),
            Self::U32 => u32::MAX.into(),
            Self::U64 => u64::MAX.into(),
        }
    }

    pub fn contains(self, n: i128) -> bool {
        (self.min()..=self.max()).contains(&n)
    }
}

/// One entry of a record's field list: JSON key and value shape.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub name: &'static str,
    pub shape: Shape,
}

/// Shape of a record type.
///
/// The field list is produced on demand so that a record may (indirectly)
/// contain itself, e.g. `children: Vec<Node>`.
#[derive(Clone, Copy)]
pub struct RecordShape {
    pub name: &'static str,
    fields: fn() -> Vec<FieldShape>,
}

impl RecordShape {
    pub fn of<R: Record>() -> Self {
        Self {
            name: R::NAME,
            fields: field_shapes::<R>,
        }
    }

    pub fn fields(&self) -> Vec<FieldShape> {
        (self.fields)()
    }
}

fn field_shapes<R: Record>() -> Vec<FieldShape> {
    R::fields()
        .iter()
        .map(|field| FieldShape {
            name: field.name(),
            shape: field.shape(),
        })
        .collect()
}

impl fmt::Debug for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordShape").field("name", &self.name).finish()
    }
}

/// The unified enum covering every decodable shape.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Any JSON value, kept as is.
    Any,
    Bool,
    Int(IntKind),
    Float,
    Str,
    /// `null` or the inner shape.
    Optional(Box<Shape>),
    /// JSON array whose elements all have the inner shape.
    Seq(Box<Shape>),
    /// JSON object with string keys whose values all have the inner shape.
    Map(Box<Shape>),
    Record(RecordShape),
}

impl Shape {
    /// Returns the kind string of the outermost level.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "bool",
            Self::Int(_) => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Optional(_) => "optional",
            Self::Seq(_) => "seq",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
        }
    }

    /// The JSON construct this shape requires, for error messages.
    pub fn expects(&self) -> String {
        match self {
            Self::Any => "any value".to_string(),
            Self::Bool => "boolean".to_string(),
            Self::Int(kind) => kind.name().to_string(),
            Self::Float => "number".to_string(),
            Self::Str => "string".to_string(),
            Self::Optional(inner) => format!("null or {}", inner.expects()),
            Self::Seq(_) => "array".to_string(),
            Self::Map(_) | Self::Record(_) => "object".to_string(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int(kind) => f.write_str(kind.name()),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::Seq(inner) => write!(f, "[{inner}]"),
            Self::Map(inner) => write!(f, "{{str: {inner}}}"),
            Self::Record(record) => f.write_str(record.name),
        }
    }
}

/// What a decode call should produce.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// Exactly one record.
    Simple(RecordShape),
    /// An ordered sequence of records.
    SequenceOf(RecordShape),
    /// Any statically declared nested shape.
    Composite(Shape),
}

impl TypeDescriptor {
    pub fn simple<R: Record>() -> Self {
        Self::Simple(RecordShape::of::<R>())
    }

    pub fn sequence_of<R: Record>() -> Self {
        Self::SequenceOf(RecordShape::of::<R>())
    }

    pub fn composite<T: JsonType>() -> Self {
        Self::Composite(T::shape())
    }

    /// Flattens the descriptor into the shape it stands for.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Simple(record) => Shape::Record(*record),
            Self::SequenceOf(record) => Shape::Seq(Box::new(Shape::Record(*record))),
            Self::Composite(shape) => shape.clone(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape())
    }
}
