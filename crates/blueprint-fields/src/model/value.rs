//! Runtime argument values.
//!
//! Values are transient: built per call, encoded against a schema, and
//! never persisted independent of their encoded bytes.

use crate::model::FieldKind;

/// A typed argument value, mirroring [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Placeholder for a job with no input/output; occupies zero bytes.
    Void,
    Bool(bool),
    Uint8(u8),
    Int8(i8),
    Uint16(u16),
    Int16(i16),
    Uint32(u32),
    Int32(i32),
    Uint64(u64),
    Int64(i64),
    Uint128(u128),
    Int128(i128),
    /// 256-bit unsigned integer, big-endian bytes.
    Uint256([u8; 32]),
    /// 256-bit signed integer, big-endian two's complement bytes.
    Int256([u8; 32]),
    /// 20-byte account address.
    Address([u8; 20]),
    Bytes32([u8; 32]),
    /// Fixed-width byte string; the width is declared by the schema node.
    FixedBytes(Vec<u8>),
    String(String),
    Bytes(Vec<u8>),
    Optional(Option<Box<Value>>),
    /// Fixed-size homogeneous sequence; length must match the schema.
    Array(Vec<Value>),
    /// Dynamic-size homogeneous sequence.
    List(Vec<Value>),
    /// Heterogeneous field sequence in declared order.
    Struct(Vec<Value>),
}

impl Value {
    /// Returns the field kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Void => FieldKind::Void,
            Value::Bool(_) => FieldKind::Bool,
            Value::Uint8(_) => FieldKind::Uint8,
            Value::Int8(_) => FieldKind::Int8,
            Value::Uint16(_) => FieldKind::Uint16,
            Value::Int16(_) => FieldKind::Int16,
            Value::Uint32(_) => FieldKind::Uint32,
            Value::Int32(_) => FieldKind::Int32,
            Value::Uint64(_) => FieldKind::Uint64,
            Value::Int64(_) => FieldKind::Int64,
            Value::Uint128(_) => FieldKind::Uint128,
            Value::Int128(_) => FieldKind::Int128,
            Value::Uint256(_) => FieldKind::Uint256,
            Value::Int256(_) => FieldKind::Int256,
            Value::Address(_) => FieldKind::Address,
            Value::Bytes32(_) => FieldKind::Bytes32,
            Value::FixedBytes(_) => FieldKind::FixedBytes,
            Value::String(_) => FieldKind::String,
            Value::Bytes(_) => FieldKind::Bytes,
            Value::Optional(_) => FieldKind::Optional,
            Value::Array(_) => FieldKind::Array,
            Value::List(_) => FieldKind::List,
            Value::Struct(_) => FieldKind::Struct,
        }
    }

    /// Widens a u64 into the 32-byte big-endian `Uint256` representation.
    pub fn uint256(v: u64) -> Value {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&v.to_be_bytes());
        Value::Uint256(bytes)
    }

    /// Widens an i64 into the 32-byte two's-complement `Int256`
    /// representation (sign-extended).
    pub fn int256(v: i64) -> Value {
        let fill = if v < 0 { 0xFF } else { 0x00 };
        let mut bytes = [fill; 32];
        bytes[24..].copy_from_slice(&v.to_be_bytes());
        Value::Int256(bytes)
    }
}
