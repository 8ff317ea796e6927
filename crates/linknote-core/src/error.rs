//! Codec error handling
//!
//! A single `CodecError` enum covers every failure mode the encoder, decoder,
//! and scalar codecs can raise. Mirrors the hand-rolled `Display`/`Error`
//! pattern used throughout this codebase's lineage rather than pulling in a
//! derive-macro error crate - there's exactly one error type and its variants
//! are simple enough that a macro would add a dependency without removing
//! any real boilerplate.

use std::fmt;

use crate::linktree::ParseError;

/// Everything that can go wrong encoding a `Value` graph or decoding text
/// back into one.
#[derive(Debug)]
pub enum CodecError {
    /// Encoder input was not one of the seven supported `Value` variants.
    UnsupportedType(String),
    /// The internal link-notation tokenizer/parser rejected the input.
    SyntaxError(ParseError),
    /// A `LinkNode`'s type tag was not one of the seven reserved tags.
    UnknownTypeTag(String),
    /// A scalar payload (bool/int/float/str) failed to parse.
    MalformedScalar(String),
    /// A `dict` entry was not a two-child `LinkNode`.
    MalformedPair,
    /// A `LinkRef(obj_k)` whose target is absent from the document, raised
    /// only when decoding in strict mode (see `DecodeOptions`).
    DanglingReference(String),
    /// An integer could not be round-tripped through the decimal
    /// representation used on the wire. Unreachable with the current `i64`
    /// backed `Value::Int` - kept for a future arbitrary-precision backend.
    IntegerOverflow(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedType(desc) => {
                write!(f, "unsupported value type: {desc}")
            }
            CodecError::SyntaxError(e) => write!(f, "link notation syntax error: {e}"),
            CodecError::UnknownTypeTag(tag) => write!(f, "unknown type tag: {tag}"),
            CodecError::MalformedScalar(msg) => write!(f, "malformed scalar: {msg}"),
            CodecError::MalformedPair => {
                write!(f, "dict entry is not a two-element pair")
            }
            CodecError::DanglingReference(id) => {
                write!(f, "dangling reference: {id} is never defined")
            }
            CodecError::IntegerOverflow(n) => {
                write!(f, "integer does not round-trip through decimal text: {n}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::SyntaxError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for CodecError {
    fn from(e: ParseError) -> Self {
        CodecError::SyntaxError(e)
    }
}
