//! Binary codecs for schemas and argument payloads.
//!
//! [`schema`] handles the versioned, self-describing schema format;
//! [`args`] handles the compact value format encoded against a schema;
//! [`primitives`] provides the shared reader/writer and compact integers.

pub mod args;
pub mod primitives;
pub mod schema;

pub use args::{
    DecodedArgument, decode_arguments, decode_arguments_labeled, decode_value, encode_arguments,
    encode_arguments_named, encode_value,
};
pub use primitives::{Reader, Writer};
pub use schema::{decode_schema, encode_schema, encode_schema_v1};
