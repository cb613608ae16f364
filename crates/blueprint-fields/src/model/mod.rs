//! Data model types for schemas and argument values.
//!
//! - Field kinds (the closed tag enumeration)
//! - Schema trees (recursive type descriptions)
//! - Values (typed argument instances)

pub mod kind;
pub mod schema;
pub mod value;

pub use kind::{FieldKind, ALL_KINDS};
pub use schema::{argument_label, FieldNode};
pub use value::Value;
