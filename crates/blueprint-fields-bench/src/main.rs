//! Benchmark for schema and argument serialization.
//!
//! Builds a synthetic transfer-like call with a mix of scalar, container,
//! and nested struct fields, then measures encode and decode throughput
//! over a large batch of payloads.

use std::time::Instant;

use blueprint_fields::{
    FieldKind, FieldNode, Value, decode_arguments, decode_schema, encode_arguments, encode_schema,
};

const ITERATIONS: usize = 200_000;

fn transfer_schema() -> Vec<FieldNode> {
    vec![
        FieldNode::leaf(FieldKind::Address).named("recipient"),
        FieldNode::leaf(FieldKind::Uint256).named("amount"),
        FieldNode::leaf(FieldKind::Uint64).named("nonce"),
        FieldNode::optional(FieldNode::leaf(FieldKind::String)).named("memo"),
        FieldNode::list(FieldNode::structure(vec![
            FieldNode::leaf(FieldKind::Address).named("signer"),
            FieldNode::leaf(FieldKind::Bytes32).named("signature_hash"),
        ]))
        .named("approvals"),
        FieldNode::array(4, FieldNode::leaf(FieldKind::Uint8)).named("flags"),
    ]
}

fn transfer_args(seed: u64) -> Vec<Value> {
    let mut address = [0u8; 20];
    address[12..].copy_from_slice(&seed.to_be_bytes());
    let mut hash = [0u8; 32];
    hash[24..].copy_from_slice(&seed.to_be_bytes());

    vec![
        Value::Address(address),
        Value::uint256(seed.wrapping_mul(1_000)),
        Value::Uint64(seed),
        Value::Optional(if seed % 3 == 0 {
            Some(Box::new(Value::String(format!("payment #{}", seed))))
        } else {
            None
        }),
        Value::List(
            (0..(seed % 4))
                .map(|_| Value::Struct(vec![Value::Address(address), Value::Bytes32(hash)]))
                .collect(),
        ),
        Value::Array(vec![
            Value::Uint8(seed as u8),
            Value::Uint8(0),
            Value::Uint8(1),
            Value::Uint8(255),
        ]),
    ]
}

fn main() {
    let schema = transfer_schema();

    // Schema codec.
    let start = Instant::now();
    let schema_bytes = encode_schema(&schema).expect("encode schema");
    for _ in 0..ITERATIONS {
        decode_schema(&schema_bytes).expect("decode schema");
    }
    let elapsed = start.elapsed();
    println!(
        "schema: {} bytes, {} decodes in {:.3}s ({:.0} ops/s)",
        schema_bytes.len(),
        ITERATIONS,
        elapsed.as_secs_f64(),
        ITERATIONS as f64 / elapsed.as_secs_f64()
    );

    // Argument encode.
    let args: Vec<Vec<Value>> = (0..ITERATIONS as u64).map(transfer_args).collect();
    let start = Instant::now();
    let mut payloads = Vec::with_capacity(args.len());
    let mut total_bytes = 0usize;
    for values in &args {
        let bytes = encode_arguments(values, &schema).expect("encode arguments");
        total_bytes += bytes.len();
        payloads.push(bytes);
    }
    let elapsed = start.elapsed();
    println!(
        "encode: {} payloads, {} bytes total in {:.3}s ({:.1} MB/s)",
        payloads.len(),
        total_bytes,
        elapsed.as_secs_f64(),
        total_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );

    // Argument decode.
    let start = Instant::now();
    for bytes in &payloads {
        decode_arguments(bytes, &schema).expect("decode arguments");
    }
    let elapsed = start.elapsed();
    println!(
        "decode: {} payloads in {:.3}s ({:.1} MB/s)",
        payloads.len(),
        elapsed.as_secs_f64(),
        total_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );
}
