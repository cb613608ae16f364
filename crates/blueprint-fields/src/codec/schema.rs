//! Versioned binary codec for field schemas.
//!
//! Wire layout:
//!
//! ```text
//! [version: 1 byte, omitted in v1]
//! [field_count: 2 bytes BE]
//! [node]*
//! ```
//!
//! where each node is:
//!
//! ```text
//! [kind: 1 byte]
//! [array_length: 2 bytes BE]
//! [child_count: 2 bytes BE]
//! [name: compact-length-prefixed UTF-8, v2 only]
//! [child node]*
//! ```
//!
//! Version detection sniffs the first byte: a value of 2 or greater is
//! consumed as a version marker, anything lower means a legacy v1 payload
//! whose first byte is already the high byte of the field count. A legacy
//! schema whose field count happens to have a high byte >= 2 is therefore
//! indistinguishable from a versioned one; producers of v1 payloads must
//! stay below 512 top-level fields for the sniff to hold.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    FORMAT_VERSION, LEGACY_VERSION, MAX_DEPTH, MAX_INPUT_SIZE, MAX_NAME_LEN, MAX_SCHEMA_FIELDS,
    MAX_SCHEMA_NODES,
};
use crate::model::{FieldKind, FieldNode};

use super::primitives::{Reader, Writer};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a schema in the current format version.
///
/// Field names are carried on the wire. Decoding the result yields a schema
/// equal to the input. An empty schema encodes as empty bytes.
pub fn encode_schema(fields: &[FieldNode]) -> Result<Vec<u8>, EncodeError> {
    encode_schema_at(fields, FORMAT_VERSION)
}

/// Encodes a schema in the legacy v1 format.
///
/// V1 payloads carry no version byte and no field names; names are erased
/// on the wire and come back as `None` after decoding.
pub fn encode_schema_v1(fields: &[FieldNode]) -> Result<Vec<u8>, EncodeError> {
    encode_schema_at(fields, LEGACY_VERSION)
}

fn encode_schema_at(fields: &[FieldNode], version: u8) -> Result<Vec<u8>, EncodeError> {
    // No schema means unconstrained raw bytes, written as no bytes at all.
    if fields.is_empty() {
        return Ok(Vec::new());
    }
    if fields.len() > MAX_SCHEMA_FIELDS {
        return Err(EncodeError::SchemaTooLarge {
            len: fields.len(),
            max: MAX_SCHEMA_FIELDS,
        });
    }

    let mut writer = Writer::with_capacity(16 + fields.len() * 8);
    if version >= 2 {
        writer.write_byte(version);
    }
    writer.write_u16(fields.len() as u16);
    for field in fields {
        encode_node(&mut writer, field, version, 0)?;
    }
    Ok(writer.into_bytes())
}

fn encode_node(
    writer: &mut Writer,
    node: &FieldNode,
    version: u8,
    depth: usize,
) -> Result<(), EncodeError> {
    if depth >= MAX_DEPTH {
        return Err(EncodeError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }
    if let Err(context) = node.validate_arity() {
        return Err(EncodeError::SchemaValidationFailed { context });
    }
    if node.children.len() > MAX_SCHEMA_FIELDS {
        return Err(EncodeError::SchemaTooLarge {
            len: node.children.len(),
            max: MAX_SCHEMA_FIELDS,
        });
    }

    writer.write_byte(node.kind as u8);
    writer.write_u16(node.array_length);
    writer.write_u16(node.children.len() as u16);
    if version >= 2 {
        // An absent name is written as the empty string.
        let name = node.name.as_deref().unwrap_or("");
        writer.write_string(name, "field name")?;
    }
    for child in &node.children {
        encode_node(writer, child, version, depth + 1)?;
    }
    Ok(())
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a schema, accepting both the current and the legacy v1 format.
///
/// The entire input must be consumed; trailing bytes are rejected.
pub fn decode_schema(bytes: &[u8]) -> Result<Vec<FieldNode>, DecodeError> {
    if bytes.len() > MAX_INPUT_SIZE {
        return Err(DecodeError::InputTooLarge {
            context: "schema",
            len: bytes.len(),
            max: MAX_INPUT_SIZE,
        });
    }

    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::new(bytes);

    let first = reader.read_byte("schema version")?;
    let version = if first >= 2 {
        if first > FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion { version: first });
        }
        first
    } else {
        // Legacy payload: the byte we sniffed is the high byte of the
        // field count, so rewind.
        reader = Reader::new(bytes);
        LEGACY_VERSION
    };

    let field_count = reader.read_u16("schema field count")? as usize;
    let mut remaining_nodes = MAX_SCHEMA_NODES;
    let mut fields = Vec::with_capacity(field_count.min(MAX_SCHEMA_NODES));
    for _ in 0..field_count {
        fields.push(decode_node(&mut reader, version, 0, &mut remaining_nodes)?);
    }

    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            remaining: reader.remaining_len(),
        });
    }
    Ok(fields)
}

fn decode_node(
    reader: &mut Reader,
    version: u8,
    depth: usize,
    remaining_nodes: &mut usize,
) -> Result<FieldNode, DecodeError> {
    if depth >= MAX_DEPTH {
        return Err(DecodeError::RecursionLimitExceeded { limit: MAX_DEPTH });
    }
    if *remaining_nodes == 0 {
        return Err(DecodeError::SchemaTooLarge {
            what: "schema nodes",
            len: MAX_SCHEMA_NODES + 1,
            max: MAX_SCHEMA_NODES,
        });
    }
    *remaining_nodes -= 1;

    let kind_byte = reader.read_byte("field kind")?;
    let kind =
        FieldKind::from_u8(kind_byte).ok_or(DecodeError::UnknownFieldKind { kind: kind_byte })?;
    let array_length = reader.read_u16("array length")?;
    let child_count = reader.read_u16("child count")? as usize;

    let name = if version >= 2 {
        let s = reader.read_string(MAX_NAME_LEN, "field name")?;
        if s.is_empty() { None } else { Some(s) }
    } else {
        None
    };

    // Structural checks mirror FieldNode::validate_arity on the encode side.
    match kind {
        FieldKind::Optional | FieldKind::Array | FieldKind::List => {
            if child_count != 1 {
                return Err(DecodeError::SchemaValidationFailed {
                    context: "container requires exactly one child",
                });
            }
        }
        FieldKind::FixedBytes => {
            if array_length == 0 {
                return Err(DecodeError::SchemaValidationFailed {
                    context: "fixed_bytes requires a nonzero width",
                });
            }
            if child_count != 0 {
                return Err(DecodeError::SchemaValidationFailed {
                    context: "leaf field with children",
                });
            }
        }
        FieldKind::Struct => {}
        _ => {
            if child_count != 0 {
                return Err(DecodeError::SchemaValidationFailed {
                    context: "leaf field with children",
                });
            }
        }
    }

    let mut children = Vec::with_capacity(child_count.min(MAX_SCHEMA_NODES));
    for _ in 0..child_count {
        children.push(decode_node(reader, version, depth + 1, remaining_nodes)?);
    }

    Ok(FieldNode {
        kind,
        array_length,
        children,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Vec<FieldNode> {
        vec![
            FieldNode::leaf(FieldKind::String).named("greeting"),
            FieldNode::leaf(FieldKind::Uint256).named("amount"),
            FieldNode::list(FieldNode::leaf(FieldKind::Uint256)).named("balances"),
            FieldNode::optional(FieldNode::leaf(FieldKind::Address)),
            FieldNode::structure(vec![
                FieldNode::leaf(FieldKind::Address).named("recipient"),
                FieldNode::leaf(FieldKind::Uint256).named("amount"),
            ])
            .named("transfer"),
            FieldNode::array(4, FieldNode::leaf(FieldKind::Uint8)).named("quad"),
            FieldNode::fixed_bytes(12).named("tag"),
        ]
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = sample_schema();
        let bytes = encode_schema(&schema).unwrap();
        let decoded = decode_schema(&bytes).unwrap();
        assert_eq!(schema, decoded);
    }

    #[test]
    fn test_v1_roundtrip_erases_names() {
        let schema = sample_schema();
        let bytes = encode_schema_v1(&schema).unwrap();
        let decoded = decode_schema(&bytes).unwrap();
        assert_eq!(schema.len(), decoded.len());
        for (original, decoded) in schema.iter().zip(&decoded) {
            assert_eq!(original.kind, decoded.kind);
            assert_eq!(original.array_length, decoded.array_length);
            assert_eq!(decoded.name, None);
        }
        // Children lose names too.
        assert_eq!(decoded[4].children[0].name, None);
    }

    #[test]
    fn test_empty_name_decodes_as_none() {
        let schema = vec![FieldNode::leaf(FieldKind::Bool)];
        let bytes = encode_schema(&schema).unwrap();
        let decoded = decode_schema(&bytes).unwrap();
        assert_eq!(decoded[0].name, None);
    }

    #[test]
    fn test_list_of_uint256_roundtrip() {
        // Nested container child kinds must survive the roundtrip intact.
        let schema = vec![FieldNode::list(FieldNode::leaf(FieldKind::Uint256))];
        let bytes = encode_schema(&schema).unwrap();
        let decoded = decode_schema(&bytes).unwrap();
        assert_eq!(decoded[0].kind, FieldKind::List);
        assert_eq!(decoded[0].children[0].kind, FieldKind::Uint256);
    }

    #[test]
    fn test_unknown_field_kind() {
        let mut bytes = encode_schema(&[FieldNode::leaf(FieldKind::Bool)]).unwrap();
        // Corrupt the kind byte of the first node (version + field count = 3 bytes).
        bytes[3] = 0xAB;
        let result = decode_schema(&bytes);
        assert_eq!(result, Err(DecodeError::UnknownFieldKind { kind: 0xAB }));
    }

    #[test]
    fn test_unsupported_version() {
        let bytes = [3u8, 0, 0];
        let result = decode_schema(&bytes);
        assert_eq!(result, Err(DecodeError::UnsupportedVersion { version: 3 }));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_schema(&[FieldNode::leaf(FieldKind::Bool)]).unwrap();
        bytes.push(0);
        let result = decode_schema(&bytes);
        assert_eq!(result, Err(DecodeError::TrailingBytes { remaining: 1 }));
    }

    #[test]
    fn test_truncation_sweep() {
        let bytes = encode_schema(&sample_schema()).unwrap();
        // Skip the empty prefix: no bytes legitimately decodes as no schema.
        for cut in 1..bytes.len() {
            let result = decode_schema(&bytes[..cut]);
            assert!(result.is_err(), "prefix of {} bytes decoded", cut);
        }
    }

    #[test]
    fn test_childless_list_rejected() {
        // Handcrafted v2 payload: one list node with zero children.
        let bytes = [
            2, // version
            0, 1, // field count
            FieldKind::List as u8,
            0, 0, // array length
            0, 0, // child count
            0, // empty name
        ];
        let result = decode_schema(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::SchemaValidationFailed { .. })
        ));
    }

    #[test]
    fn test_zero_width_fixed_bytes_rejected() {
        let bytes = [
            2, // version
            0, 1, // field count
            FieldKind::FixedBytes as u8,
            0, 0, // array length (invalid)
            0, 0, // child count
            0, // empty name
        ];
        let result = decode_schema(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::SchemaValidationFailed { .. })
        ));
    }

    #[test]
    fn test_recursion_limit_on_decode() {
        let mut node = FieldNode::leaf(FieldKind::Bool);
        for _ in 0..MAX_DEPTH + 1 {
            node = FieldNode::optional(node);
        }
        // The encoder rejects it too, so build the bytes by hand.
        let mut writer = Writer::new();
        writer.write_byte(FORMAT_VERSION);
        writer.write_u16(1);
        for _ in 0..MAX_DEPTH + 1 {
            writer.write_byte(FieldKind::Optional as u8);
            writer.write_u16(0);
            writer.write_u16(1);
            writer.write_byte(0); // empty name
        }
        writer.write_byte(FieldKind::Bool as u8);
        writer.write_u16(0);
        writer.write_u16(0);
        writer.write_byte(0);

        let result = decode_schema(writer.as_bytes());
        assert_eq!(
            result,
            Err(DecodeError::RecursionLimitExceeded { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn test_recursion_limit_on_encode() {
        let mut node = FieldNode::leaf(FieldKind::Bool);
        for _ in 0..MAX_DEPTH + 1 {
            node = FieldNode::optional(node);
        }
        let result = encode_schema(&[node]);
        assert_eq!(
            result,
            Err(EncodeError::RecursionLimitExceeded { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn test_node_budget_exceeded() {
        // Flat schema with more nodes than the decoder's node limit allows.
        let count = MAX_SCHEMA_NODES + 1;
        let mut writer = Writer::new();
        writer.write_byte(FORMAT_VERSION);
        writer.write_u16(count as u16);
        for _ in 0..count {
            writer.write_byte(FieldKind::Bool as u8);
            writer.write_u16(0);
            writer.write_u16(0);
            writer.write_byte(0);
        }
        let result = decode_schema(writer.as_bytes());
        assert!(matches!(result, Err(DecodeError::SchemaTooLarge { .. })));
    }

    #[test]
    fn test_too_many_fields_on_encode() {
        let fields = vec![FieldNode::leaf(FieldKind::Bool); MAX_SCHEMA_FIELDS + 1];
        let result = encode_schema(&fields);
        assert!(matches!(result, Err(EncodeError::SchemaTooLarge { .. })));
    }

    #[test]
    fn test_legacy_sniff_small_field_count() {
        // 300 bool fields in v1: first byte is 0x01, below the version
        // threshold, so the payload decodes as legacy.
        let fields = vec![FieldNode::leaf(FieldKind::Bool); 300];
        let bytes = encode_schema_v1(&fields).unwrap();
        assert_eq!(bytes[0], 0x01);
        let decoded = decode_schema(&bytes).unwrap();
        assert_eq!(decoded.len(), 300);
    }

    #[test]
    fn test_empty_schema_is_empty_bytes() {
        let bytes = encode_schema(&[]).unwrap();
        assert!(bytes.is_empty());
        let decoded = decode_schema(&bytes).unwrap();
        assert!(decoded.is_empty());
    }
}
