//! Security limits and format constants.
//!
//! Schema and argument bytes come from untrusted parties, so every
//! attacker-controlled count on the wire is checked against one of these
//! bounds before any allocation or recursion happens.

/// Current schema encoding version. Version 2 streams carry field names.
pub const FORMAT_VERSION: u8 = 2;

/// Legacy encoding version: no version byte on the wire, no field names.
pub const LEGACY_VERSION: u8 = 1;

/// Maximum number of top-level fields in a schema.
pub const MAX_SCHEMA_FIELDS: usize = 65_535;

/// Maximum nesting depth for schema trees and argument values.
pub const MAX_DEPTH: usize = 32;

/// Maximum total number of nodes in a decoded schema tree.
pub const MAX_SCHEMA_NODES: usize = 4096;

/// Maximum accepted size for schema bytes or argument bytes.
pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// Largest value representable by the compact integer encoding (4-byte form).
pub const MAX_COMPACT: u32 = (1 << 28) - 1;

/// Maximum byte length of a field name.
pub const MAX_NAME_LEN: usize = 256;
