//! Schema lookup by blueprint and job.
//!
//! Decoders resolve the schema for a payload through a [`SchemaSource`]
//! keyed by blueprint id, job index, and direction. Published schema bytes
//! are immutable: re-registering a key with different bytes is an error,
//! enforced by comparing SHA-256 digests. An absent entry means the job
//! predates schema publication and its payloads are opaque raw bytes.

use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};

use crate::codec::schema::decode_schema;
use crate::error::{DecodeError, RegistryError};

/// Whether a schema describes a job's inputs or its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaDirection {
    Parameters,
    Results,
}

/// Identifies one schema: a job's parameter or result layout within a
/// blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub blueprint_id: u64,
    pub job_index: u8,
    pub direction: SchemaDirection,
}

impl SchemaKey {
    /// Key for a job's input parameter schema.
    pub fn parameters(blueprint_id: u64, job_index: u8) -> Self {
        Self {
            blueprint_id,
            job_index,
            direction: SchemaDirection::Parameters,
        }
    }

    /// Key for a job's output result schema.
    pub fn results(blueprint_id: u64, job_index: u8) -> Self {
        Self {
            blueprint_id,
            job_index,
            direction: SchemaDirection::Results,
        }
    }
}

/// Resolves encoded schema bytes for a key.
///
/// `Ok(None)` means no schema was ever published for the key; callers
/// should treat the payload as raw bytes rather than fail.
pub trait SchemaSource {
    fn resolve(&self, key: SchemaKey) -> Result<Option<Vec<u8>>, DecodeError>;
}

/// SHA-256 digest of encoded schema bytes, used as the immutability
/// fingerprint.
pub fn schema_digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// In-memory schema registry.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: FxHashMap<SchemaKey, Entry>,
}

#[derive(Debug)]
struct Entry {
    bytes: Vec<u8>,
    digest: [u8; 32],
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers schema bytes under a key.
    ///
    /// The bytes must decode as a valid schema. Registering the same bytes
    /// under the same key again is a no-op; different bytes are rejected.
    pub fn register(&mut self, key: SchemaKey, bytes: Vec<u8>) -> Result<(), RegistryError> {
        decode_schema(&bytes)?;
        let digest = schema_digest(&bytes);
        if let Some(existing) = self.entries.get(&key) {
            if existing.digest != digest {
                return Err(RegistryError::SchemaImmutable);
            }
            return Ok(());
        }
        self.entries.insert(key, Entry { bytes, digest });
        Ok(())
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SchemaSource for InMemoryRegistry {
    fn resolve(&self, key: SchemaKey) -> Result<Option<Vec<u8>>, DecodeError> {
        Ok(self.entries.get(&key).map(|entry| entry.bytes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::schema::encode_schema;
    use crate::model::{FieldKind, FieldNode};

    fn schema_bytes(kind: FieldKind) -> Vec<u8> {
        encode_schema(&[FieldNode::leaf(kind).named("x")]).unwrap()
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = InMemoryRegistry::new();
        let key = SchemaKey::parameters(7, 0);
        let bytes = schema_bytes(FieldKind::Uint64);
        registry.register(key, bytes.clone()).unwrap();

        let resolved = registry.resolve(key).unwrap();
        assert_eq!(resolved, Some(bytes));
        assert_eq!(registry.resolve(SchemaKey::results(7, 0)).unwrap(), None);
    }

    #[test]
    fn test_reregistering_same_bytes_is_noop() {
        let mut registry = InMemoryRegistry::new();
        let key = SchemaKey::parameters(1, 2);
        let bytes = schema_bytes(FieldKind::Bool);
        registry.register(key, bytes.clone()).unwrap();
        registry.register(key, bytes).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_schemas_are_immutable() {
        let mut registry = InMemoryRegistry::new();
        let key = SchemaKey::parameters(1, 2);
        registry.register(key, schema_bytes(FieldKind::Bool)).unwrap();

        let result = registry.register(key, schema_bytes(FieldKind::String));
        assert_eq!(result, Err(RegistryError::SchemaImmutable));
    }

    #[test]
    fn test_invalid_schema_bytes_rejected() {
        let mut registry = InMemoryRegistry::new();
        let result = registry.register(SchemaKey::parameters(1, 0), vec![0xFF, 0xFF]);
        assert!(matches!(result, Err(RegistryError::InvalidSchema(_))));
    }

    #[test]
    fn test_directions_are_distinct_keys() {
        let mut registry = InMemoryRegistry::new();
        registry
            .register(SchemaKey::parameters(3, 1), schema_bytes(FieldKind::Uint8))
            .unwrap();
        registry
            .register(SchemaKey::results(3, 1), schema_bytes(FieldKind::String))
            .unwrap();
        assert_eq!(registry.len(), 2);
    }
}
