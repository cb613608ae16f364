//! Error types for schema/argument encoding and decoding.

use thiserror::Error;

use crate::model::FieldKind;

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    TruncatedInput { context: &'static str },

    #[error("{remaining} trailing byte(s) after the last decoded item")]
    TrailingBytes { remaining: usize },

    #[error("unknown field kind tag: {kind}")]
    UnknownFieldKind { kind: u8 },

    #[error("unsupported schema version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("nesting exceeds the maximum depth of {limit}")]
    RecursionLimitExceeded { limit: usize },

    #[error("schema declares {len} {what}, maximum is {max}")]
    SchemaTooLarge {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{context} length {len} exceeds maximum {max}")]
    InputTooLarge {
        context: &'static str,
        len: usize,
        max: usize,
    },

    #[error("schema validation failed: {context}")]
    SchemaValidationFailed { context: &'static str },

    #[error("invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("schema declares {len} fields, maximum is {max}")]
    SchemaTooLarge { len: usize, max: usize },

    #[error("expected {expected} value(s), found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("argument {index} has kind {found:?}, schema declares {expected:?}")]
    TypeMismatch {
        index: usize,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("schema field {index} carries no name; named arguments require a fully named schema")]
    UnnamedParameter { index: usize },

    #[error("argument name {name:?} does not match any schema field")]
    UnknownFieldName { name: String },

    #[error("argument name {name:?} was supplied more than once")]
    DuplicateFieldName { name: String },

    #[error("{context}: value {value} exceeds maximum {max}")]
    ValueOutOfRange {
        context: &'static str,
        value: u64,
        max: u64,
    },

    #[error("schema validation failed: {context}")]
    SchemaValidationFailed { context: &'static str },

    #[error("nesting exceeds the maximum depth of {limit}")]
    RecursionLimitExceeded { limit: usize },
}

/// Error from a schema registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Published schemas are immutable; a new job or blueprint version is
    /// required to change one.
    #[error("a different schema is already registered under this key")]
    SchemaImmutable,

    #[error("schema bytes failed to decode: {0}")]
    InvalidSchema(#[from] DecodeError),
}
