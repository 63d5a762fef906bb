//! Error types for decoding, value access, and metainfo interpretation.

use thiserror::Error;

use crate::model::Kind;

/// Error during bencode decoding.
///
/// Every variant that points at the input carries the byte offset where the
/// offending value starts, so callers can report where a document went bad.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty input")]
    EmptyInput,

    #[error("malformed string length at offset {offset}: {reason}")]
    MalformedLength { offset: usize, reason: &'static str },

    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { offset: usize, reason: &'static str },

    #[error("unterminated {kind} starting at offset {offset}")]
    UnterminatedContainer { kind: Kind, offset: usize },

    #[error("dictionary key at offset {offset} is a {found}, expected a byte string")]
    KeyType { offset: usize, found: Kind },

    #[error("unsupported type prefix {byte:#04x} at offset {offset}")]
    UnsupportedType { byte: u8, offset: usize },

    #[error("nesting exceeds {max} levels")]
    NestingTooDeep { max: usize },
}

/// Error returned by typed accessors when a value has a different variant
/// than the caller assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: Kind,
    pub found: Kind,
}

/// Error while interpreting a decoded torrent dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    #[error("torrent root is not a dictionary")]
    NotADictionary,

    #[error("missing required field {0:?}")]
    MissingField(&'static str),

    #[error("field {field:?}: {source}")]
    FieldType {
        field: &'static str,
        source: TypeMismatch,
    },

    #[error("field {field:?} is out of range")]
    FieldRange { field: &'static str },

    #[error("pieces length {len} is not a multiple of 20")]
    InvalidPieces { len: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
