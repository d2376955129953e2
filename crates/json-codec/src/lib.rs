//! `json-codec` — typed conversion between Rust values and JSON text.
//!
//! Four operations cover the usual ways of talking to JSON:
//!
//! - [`Codec::encode`]: value (record, sequence, nested shape) to JSON text;
//! - [`Codec::decode_one`]: JSON object to one [`Record`];
//! - [`Codec::decode_sequence`]: JSON array to `Vec` of records;
//! - [`Codec::decode_shape`]: JSON text to any [`JsonType`], e.g. `Vec<Vec<User>>`.
//!
//! [`Codec::decode`] does the same job at runtime from a [`TypeDescriptor`],
//! returning a normalized `serde_json::Value`.
//!
//! Records describe themselves with an explicit field table instead of
//! reflection; see [`Record`].

pub mod codec;
pub mod conform;
pub mod error;
pub mod json_type;
pub mod options;
pub mod parse;
pub mod path;
pub mod record;
pub mod scope;
pub mod shape;

// Re-export the most commonly used types at crate root
pub use codec::Codec;
pub use error::{DecodeError, DepthExceeded, EncodeError};
pub use json_type::JsonType;
pub use options::CodecOptions;
pub use record::{Field, Record};
pub use scope::Scope;
pub use shape::{FieldShape, IntKind, RecordShape, Shape, TypeDescriptor};
