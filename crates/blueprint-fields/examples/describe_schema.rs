//! Simple decoder to inspect schema files.
//!
//! Reads encoded schema bytes from a file and prints the argument labels,
//! one per line. With a second file argument, also decodes that file's
//! bytes as an argument payload against the schema.

use std::fs;

use blueprint_fields::{Value, argument_label, decode_arguments_labeled, decode_schema};

fn format_value(v: &Value) -> String {
    match v {
        Value::Void => "void".to_string(),
        Value::Bool(b) => format!("{}", b),
        Value::Uint8(v) => format!("{}", v),
        Value::Int8(v) => format!("{}", v),
        Value::Uint16(v) => format!("{}", v),
        Value::Int16(v) => format!("{}", v),
        Value::Uint32(v) => format!("{}", v),
        Value::Int32(v) => format!("{}", v),
        Value::Uint64(v) => format!("{}", v),
        Value::Int64(v) => format!("{}", v),
        Value::Uint128(v) => format!("{}", v),
        Value::Int128(v) => format!("{}", v),
        Value::Uint256(b) | Value::Int256(b) | Value::Bytes32(b) => format!("0x{}", hex(b)),
        Value::Address(b) => format!("0x{}", hex(b)),
        Value::FixedBytes(b) | Value::Bytes(b) => format!("BYTES[{}]", b.len()),
        Value::String(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.len() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Optional(None) => "none".to_string(),
        Value::Optional(Some(inner)) => format!("some({})", format_value(inner)),
        Value::Array(items) | Value::List(items) | Value::Struct(items) => {
            let parts: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let schema_path = args.next().expect("usage: describe_schema <schema> [payload]");
    let payload_path = args.next();

    let schema_bytes = fs::read(&schema_path).expect("Failed to read schema file");
    println!("Schema: {} ({} bytes)", schema_path, schema_bytes.len());

    let schema = decode_schema(&schema_bytes).expect("Failed to decode schema");
    println!("\n=== Fields ===");
    for (index, node) in schema.iter().enumerate() {
        println!("  {}", argument_label(node, index));
    }

    if let Some(path) = payload_path {
        let payload = fs::read(&path).expect("Failed to read payload file");
        println!("\nPayload: {} ({} bytes)", path, payload.len());

        let decoded =
            decode_arguments_labeled(&payload, &schema).expect("Failed to decode arguments");
        println!("\n=== Arguments ===");
        for arg in &decoded {
            println!("  {} = {}", arg.label, format_value(&arg.value));
        }
    }
}
