//! JSON text to tree, with the nesting limit applied before parsing.
//!
//! serde_json's own recursion guard stops at a fixed 128 levels. The parser
//! here runs without it, so [`CodecOptions::max_depth`] is the only limit,
//! and it is checked by an iterative scan first so that no input can drive
//! the recursive parser past it.
//!
//! [`CodecOptions::max_depth`]: crate::CodecOptions::max_depth

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DecodeError, DepthExceeded};
use crate::path::format_pointer;

enum Frame {
    Array(usize),
    Object { key: String, want_key: bool },
}

impl Frame {
    fn step(&self) -> String {
        match self {
            Frame::Array(index) => index.to_string(),
            Frame::Object { key, .. } => key.clone(),
        }
    }
}

/// Parses `text` into a tree no deeper than `max_depth` levels.
///
/// Malformed text that is also too deep reports [`DecodeError::Depth`].
pub fn parse(text: &str, max_depth: usize) -> Result<Value, DecodeError> {
    check_nesting(text, max_depth)?;
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let tree = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(tree)
}

/// Finds the first array or object that opens more than `max_depth` levels
/// below the root.
///
/// The pointer is the one a [`Scope`](crate::Scope) walk would report for the
/// same container. Anything malformed is left for the parser to report.
pub fn check_nesting(text: &str, max_depth: usize) -> Result<(), DepthExceeded> {
    let bytes = text.as_bytes();
    let mut frames: Vec<Frame> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += if bytes[i] == b'\\' { 2 } else { 1 };
                }
                if i >= bytes.len() {
                    return Ok(());
                }
                if let Some(Frame::Object { key, want_key }) = frames.last_mut() {
                    if *want_key {
                        *key = serde_json::from_str(&text[start..=i]).unwrap_or_default();
                        *want_key = false;
                    }
                }
            }
            open @ (b'[' | b'{') => {
                if frames.len() > max_depth {
                    let steps: Vec<String> = frames.iter().map(Frame::step).collect();
                    return Err(DepthExceeded {
                        limit: max_depth,
                        pointer: format_pointer(&steps),
                    });
                }
                frames.push(if open == b'[' {
                    Frame::Array(0)
                } else {
                    Frame::Object {
                        key: String::new(),
                        want_key: true,
                    }
                });
            }
            b']' | b'}' => {
                frames.pop();
            }
            b',' => match frames.last_mut() {
                Some(Frame::Array(index)) => *index += 1,
                Some(Frame::Object { want_key, .. }) => *want_key = true,
                None => {}
            },
            _ => {}
        }
        i += 1;
    }
    Ok(())
}
