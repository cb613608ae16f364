//! Compact self-describing schema and argument codec for blueprint job
//! calls.
//!
//! A blueprint publishes one schema per job describing the shape of its
//! parameters and results. Argument payloads are then encoded against
//! that schema with no per-value type tags, padding, or alignment, which
//! keeps the wire format both small and strictly validated.
//!
//! # Example
//!
//! ```
//! use blueprint_fields::{
//!     FieldKind, FieldNode, Value, decode_arguments, decode_schema, encode_arguments,
//!     encode_schema,
//! };
//!
//! // The schema for a transfer job: a recipient and an amount.
//! let schema = vec![
//!     FieldNode::leaf(FieldKind::Address).named("recipient"),
//!     FieldNode::leaf(FieldKind::Uint256).named("amount"),
//! ];
//!
//! // Schemas roundtrip through their versioned binary form.
//! let schema_bytes = encode_schema(&schema)?;
//! assert_eq!(decode_schema(&schema_bytes)?, schema);
//!
//! // Arguments encode compactly against the schema: 20 + 32 bytes here.
//! let args = vec![Value::Address([0x11; 20]), Value::uint256(1_000)];
//! let payload = encode_arguments(&args, &schema)?;
//! assert_eq!(payload.len(), 52);
//! assert_eq!(decode_arguments(&payload, &schema)?, args);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod registry;

pub use codec::{
    DecodedArgument, Reader, Writer, decode_arguments, decode_arguments_labeled, decode_value,
    decode_schema, encode_arguments, encode_arguments_named, encode_schema, encode_schema_v1,
    encode_value,
};
pub use error::{DecodeError, EncodeError, RegistryError};
pub use limits::{FORMAT_VERSION, LEGACY_VERSION};
pub use model::{ALL_KINDS, FieldKind, FieldNode, Value, argument_label};
pub use registry::{InMemoryRegistry, SchemaDirection, SchemaKey, SchemaSource, schema_digest};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
