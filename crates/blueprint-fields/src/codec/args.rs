//! Compact binary codec for argument values.
//!
//! Values are encoded without padding or alignment, in schema order. The
//! wire carries no type information of its own; a payload is only
//! meaningful next to the schema it was encoded against.
//!
//! Per-kind layout:
//!
//! ```text
//! void                nothing
//! bool                1 byte, 0 or 1
//! uintN / intN        N/8 bytes, big-endian (two's complement for signed)
//! uint256 / int256    32 bytes, big-endian
//! address             20 bytes
//! bytes32             32 bytes
//! fixed_bytes[W]      W bytes
//! string / bytes      compact length prefix, then the bytes
//! optional<T>         1 presence byte (0 or 1), then T if present
//! list<T>             compact element count, then the elements
//! array[N]<T>         exactly N elements, no count on the wire
//! struct{..}          the fields, concatenated
//! ```

use rustc_hash::FxHashMap;

use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_DEPTH, MAX_INPUT_SIZE};
use crate::model::{FieldKind, FieldNode, Value, argument_label};

use super::primitives::{Reader, Writer};

/// A decoded argument together with its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArgument {
    /// Rendered as `name: type`, with a positional fallback for unnamed
    /// fields.
    pub label: String,
    pub value: Value,
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a positional argument list against a schema.
pub fn encode_arguments(values: &[Value], schema: &[FieldNode]) -> Result<Vec<u8>, EncodeError> {
    if values.len() != schema.len() {
        return Err(EncodeError::ArityMismatch {
            expected: schema.len(),
            found: values.len(),
        });
    }
    let mut writer = Writer::with_capacity(values.len() * 8);
    for (index, (value, node)) in values.iter().zip(schema).enumerate() {
        encode_value_at(&mut writer, value, node, index, 0)?;
    }
    Ok(writer.into_bytes())
}

/// Encodes named arguments against a schema, reordering them to schema
/// order. The output is byte-identical to the positional encoding.
///
/// Every schema field must carry a name, every pair must match exactly one
/// field, and no name may repeat.
pub fn encode_arguments_named(
    pairs: &[(&str, Value)],
    schema: &[FieldNode],
) -> Result<Vec<u8>, EncodeError> {
    if pairs.len() != schema.len() {
        return Err(EncodeError::ArityMismatch {
            expected: schema.len(),
            found: pairs.len(),
        });
    }

    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, node) in schema.iter().enumerate() {
        match node.name.as_deref() {
            Some(name) => {
                positions.insert(name, index);
            }
            None => return Err(EncodeError::UnnamedParameter { index }),
        }
    }

    let mut ordered: Vec<Option<&Value>> = vec![None; schema.len()];
    for (name, value) in pairs {
        let index = *positions
            .get(name)
            .ok_or_else(|| EncodeError::UnknownFieldName {
                name: name.to_string(),
            })?;
        if ordered[index].is_some() {
            return Err(EncodeError::DuplicateFieldName {
                name: name.to_string(),
            });
        }
        ordered[index] = Some(value);
    }

    let mut writer = Writer::with_capacity(pairs.len() * 8);
    for (index, (slot, node)) in ordered.iter().zip(schema).enumerate() {
        // All slots are filled: pairs.len() == schema.len() and duplicates
        // were rejected above.
        let value = slot.ok_or(EncodeError::ArityMismatch {
            expected: schema.len(),
            found: pairs.len(),
        })?;
        encode_value_at(&mut writer, value, node, index, 0)?;
    }
    Ok(writer.into_bytes())
}

/// Encodes a single value against a single field schema.
pub fn encode_value(value: &Value, node: &FieldNode) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    encode_value_at(&mut writer, value, node, 0, 0)?;
    Ok(writer.into_bytes())
}

fn element_node(node: &FieldNode) -> Result<&FieldNode, EncodeError> {
    node.children
        .first()
        .ok_or(EncodeError::SchemaValidationFailed {
            context: "container missing element schema",
        })
}

fn encode_value_at(
    writer: &mut Writer,
    value: &Value,
    node: &FieldNode,
    index: usize,
    depth: usize,
) -> Result<(), EncodeError> {
    if depth >= MAX_DEPTH {
        return Err(EncodeError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }
    if value.kind() != node.kind {
        return Err(EncodeError::TypeMismatch {
            index,
            expected: node.kind,
            found: value.kind(),
        });
    }

    match value {
        Value::Void => {}
        Value::Bool(b) => writer.write_byte(*b as u8),
        Value::Uint8(v) => writer.write_byte(*v),
        Value::Int8(v) => writer.write_byte(*v as u8),
        Value::Uint16(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Int16(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Uint32(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Int32(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Uint64(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Int64(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Uint128(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Int128(v) => writer.write_bytes(&v.to_be_bytes()),
        Value::Uint256(bytes) | Value::Int256(bytes) | Value::Bytes32(bytes) => {
            writer.write_bytes(bytes)
        }
        Value::Address(bytes) => writer.write_bytes(bytes),
        Value::FixedBytes(bytes) => {
            if bytes.len() != node.array_length as usize {
                return Err(EncodeError::ArityMismatch {
                    expected: node.array_length as usize,
                    found: bytes.len(),
                });
            }
            writer.write_bytes(bytes);
        }
        Value::String(s) => writer.write_string(s, "string value")?,
        Value::Bytes(bytes) => {
            writer.write_len(bytes.len(), "bytes value")?;
            writer.write_bytes(bytes);
        }
        Value::Optional(inner) => match inner {
            Some(inner) => {
                writer.write_byte(1);
                encode_value_at(writer, inner, element_node(node)?, index, depth + 1)?;
            }
            None => writer.write_byte(0),
        },
        Value::List(items) => {
            let element = element_node(node)?;
            writer.write_len(items.len(), "list count")?;
            for item in items {
                encode_value_at(writer, item, element, index, depth + 1)?;
            }
        }
        Value::Array(items) => {
            if items.len() != node.array_length as usize {
                return Err(EncodeError::ArityMismatch {
                    expected: node.array_length as usize,
                    found: items.len(),
                });
            }
            let element = element_node(node)?;
            for item in items {
                encode_value_at(writer, item, element, index, depth + 1)?;
            }
        }
        Value::Struct(fields) => {
            if fields.len() != node.children.len() {
                return Err(EncodeError::ArityMismatch {
                    expected: node.children.len(),
                    found: fields.len(),
                });
            }
            for (field, child) in fields.iter().zip(&node.children) {
                encode_value_at(writer, field, child, index, depth + 1)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a full argument payload against a schema.
///
/// The entire input must be consumed; trailing bytes are rejected.
pub fn decode_arguments(bytes: &[u8], schema: &[FieldNode]) -> Result<Vec<Value>, DecodeError> {
    if bytes.len() > MAX_INPUT_SIZE {
        return Err(DecodeError::InputTooLarge {
            context: "arguments",
            len: bytes.len(),
            max: MAX_INPUT_SIZE,
        });
    }
    let mut reader = Reader::new(bytes);
    let mut values = Vec::with_capacity(schema.len());
    for node in schema {
        values.push(decode_value_node(&mut reader, node, 0)?);
    }
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            remaining: reader.remaining_len(),
        });
    }
    Ok(values)
}

/// Decodes a full argument payload into labeled values.
pub fn decode_arguments_labeled(
    bytes: &[u8],
    schema: &[FieldNode],
) -> Result<Vec<DecodedArgument>, DecodeError> {
    let values = decode_arguments(bytes, schema)?;
    Ok(values
        .into_iter()
        .zip(schema)
        .enumerate()
        .map(|(index, (value, node))| DecodedArgument {
            label: argument_label(node, index),
            value,
        })
        .collect())
}

/// Decodes a single value at a byte offset, returning the value and the
/// cursor position just past it.
pub fn decode_value(
    bytes: &[u8],
    cursor: usize,
    node: &FieldNode,
) -> Result<(Value, usize), DecodeError> {
    if cursor > bytes.len() {
        return Err(DecodeError::TruncatedInput { context: "value" });
    }
    let mut reader = Reader::new(&bytes[cursor..]);
    let value = decode_value_node(&mut reader, node, 0)?;
    Ok((value, cursor + reader.position()))
}

fn read_flag(reader: &mut Reader, context: &'static str) -> Result<bool, DecodeError> {
    match reader.read_byte(context)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DecodeError::SchemaValidationFailed { context }),
    }
}

fn decode_value_node(
    reader: &mut Reader,
    node: &FieldNode,
    depth: usize,
) -> Result<Value, DecodeError> {
    if depth >= MAX_DEPTH {
        return Err(DecodeError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }

    let element = || {
        node.children
            .first()
            .ok_or(DecodeError::SchemaValidationFailed {
                context: "container missing element schema",
            })
    };

    let value = match node.kind {
        FieldKind::Void => Value::Void,
        FieldKind::Bool => Value::Bool(read_flag(reader, "bool value")?),
        FieldKind::Uint8 => Value::Uint8(reader.read_byte("uint8 value")?),
        FieldKind::Int8 => Value::Int8(reader.read_byte("int8 value")? as i8),
        FieldKind::Uint16 => {
            let b = reader.read_bytes(2, "uint16 value")?;
            // Width is guaranteed by read_bytes.
            Value::Uint16(u16::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Int16 => {
            let b = reader.read_bytes(2, "int16 value")?;
            Value::Int16(i16::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Uint32 => {
            let b = reader.read_bytes(4, "uint32 value")?;
            Value::Uint32(u32::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Int32 => {
            let b = reader.read_bytes(4, "int32 value")?;
            Value::Int32(i32::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Uint64 => {
            let b = reader.read_bytes(8, "uint64 value")?;
            Value::Uint64(u64::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Int64 => {
            let b = reader.read_bytes(8, "int64 value")?;
            Value::Int64(i64::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Uint128 => {
            let b = reader.read_bytes(16, "uint128 value")?;
            Value::Uint128(u128::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Int128 => {
            let b = reader.read_bytes(16, "int128 value")?;
            Value::Int128(i128::from_be_bytes(b.try_into().unwrap()))
        }
        FieldKind::Uint256 => {
            let b = reader.read_bytes(32, "uint256 value")?;
            Value::Uint256(b.try_into().unwrap())
        }
        FieldKind::Int256 => {
            let b = reader.read_bytes(32, "int256 value")?;
            Value::Int256(b.try_into().unwrap())
        }
        FieldKind::Address => {
            let b = reader.read_bytes(20, "address value")?;
            Value::Address(b.try_into().unwrap())
        }
        FieldKind::Bytes32 => {
            let b = reader.read_bytes(32, "bytes32 value")?;
            Value::Bytes32(b.try_into().unwrap())
        }
        FieldKind::FixedBytes => {
            let b = reader.read_bytes(node.array_length as usize, "fixed bytes value")?;
            Value::FixedBytes(b.to_vec())
        }
        FieldKind::String => Value::String(reader.read_string(MAX_INPUT_SIZE, "string value")?),
        FieldKind::Bytes => {
            let len = reader.read_compact("bytes length")? as usize;
            if len > MAX_INPUT_SIZE {
                return Err(DecodeError::InputTooLarge {
                    context: "bytes value",
                    len,
                    max: MAX_INPUT_SIZE,
                });
            }
            Value::Bytes(reader.read_bytes(len, "bytes value")?.to_vec())
        }
        FieldKind::Optional => {
            if read_flag(reader, "optional flag")? {
                let inner = decode_value_node(reader, element()?, depth + 1)?;
                Value::Optional(Some(Box::new(inner)))
            } else {
                Value::Optional(None)
            }
        }
        FieldKind::List => {
            let count = reader.read_compact("list count")? as usize;
            // Elements like void occupy zero wire bytes, so the count
            // alone cannot bound the work; cap it explicitly.
            if count > MAX_INPUT_SIZE {
                return Err(DecodeError::SchemaTooLarge {
                    what: "list elements",
                    len: count,
                    max: MAX_INPUT_SIZE,
                });
            }
            let element = element()?;
            let mut items = Vec::with_capacity(count.min(reader.remaining_len() + 1));
            for _ in 0..count {
                items.push(decode_value_node(reader, element, depth + 1)?);
            }
            Value::List(items)
        }
        FieldKind::Array => {
            let element = element()?;
            let mut items = Vec::with_capacity(node.array_length as usize);
            for _ in 0..node.array_length {
                items.push(decode_value_node(reader, element, depth + 1)?);
            }
            Value::Array(items)
        }
        FieldKind::Struct => {
            let mut fields = Vec::with_capacity(node.children.len());
            for child in &node.children {
                fields.push(decode_value_node(reader, child, depth + 1)?);
            }
            Value::Struct(fields)
        }
    };
    Ok(value)
}
