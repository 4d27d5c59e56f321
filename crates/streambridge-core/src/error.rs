//! Error types for the extraction, normalization, and codec pipeline.

use thiserror::Error;

/// Errors that can occur while resolving a dotted path against a JSON tree.
/// Every variant is scoped to a single message; the ingestion loop skips the
/// message and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("field {field} not found in received JSON")]
    FieldNotFound { field: String },

    #[error("field {field} in received JSON is an object, expected a single value")]
    UnexpectedObject { field: String },

    #[error("array at field {field} contains a non-scalar element at index {index}")]
    NonScalarArrayElement { field: String, index: usize },

    #[error("field {field} in received JSON is not an object")]
    NotAnObject { field: String },

    #[error("empty field path")]
    EmptyPath,
}

/// Errors from the canonical binary codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported format version {version}")]
    UnsupportedVersion { version: u8 },

    #[error("unexpected end of input: needed {needed} more bytes")]
    UnexpectedEof { needed: usize },

    #[error("invalid UTF-8 in encoded string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("unknown value tag {tag}")]
    UnknownValueTag { tag: u8 },

    #[error("{len} trailing bytes after event body")]
    TrailingBytes { len: usize },
}

/// Errors from parsing a configured `param:dotted.path` mapping list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("invalid input mapping entry: {entry}")]
    InvalidEntry { entry: String },

    #[error("duplicate parameter name in input mappings: {name}")]
    DuplicateParam { name: String },

    #[error("empty input mappings")]
    Empty,
}
