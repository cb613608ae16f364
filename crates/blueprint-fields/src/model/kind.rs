//! Field kind tags for the schema type tree.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

/// Type tags for schema fields (wire values 0-22).
///
/// Tags are append-only: persisted schema bytes must stay decodable
/// forever, so a tag is never reassigned or removed once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldKind {
    Void = 0,
    Bool = 1,
    Uint8 = 2,
    Int8 = 3,
    Uint16 = 4,
    Int16 = 5,
    Uint32 = 6,
    Int32 = 7,
    Uint64 = 8,
    Int64 = 9,
    Uint128 = 10,
    Int128 = 11,
    Uint256 = 12,
    Int256 = 13,
    Address = 14,
    Bytes32 = 15,
    FixedBytes = 16,
    String = 17,
    Bytes = 18,
    Optional = 19,
    Array = 20,
    List = 21,
    Struct = 22,
}

/// All kinds in tag order.
pub const ALL_KINDS: [FieldKind; 23] = [
    FieldKind::Void,
    FieldKind::Bool,
    FieldKind::Uint8,
    FieldKind::Int8,
    FieldKind::Uint16,
    FieldKind::Int16,
    FieldKind::Uint32,
    FieldKind::Int32,
    FieldKind::Uint64,
    FieldKind::Int64,
    FieldKind::Uint128,
    FieldKind::Int128,
    FieldKind::Uint256,
    FieldKind::Int256,
    FieldKind::Address,
    FieldKind::Bytes32,
    FieldKind::FixedBytes,
    FieldKind::String,
    FieldKind::Bytes,
    FieldKind::Optional,
    FieldKind::Array,
    FieldKind::List,
    FieldKind::Struct,
];

lazy_static! {
    static ref KIND_BY_NAME: FxHashMap<&'static str, FieldKind> = {
        let mut map = FxHashMap::default();
        for kind in ALL_KINDS {
            map.insert(kind.type_name(), kind);
        }
        map
    };
}

impl FieldKind {
    /// Creates a FieldKind from its wire tag.
    pub fn from_u8(v: u8) -> Option<FieldKind> {
        match v {
            0 => Some(FieldKind::Void),
            1 => Some(FieldKind::Bool),
            2 => Some(FieldKind::Uint8),
            3 => Some(FieldKind::Int8),
            4 => Some(FieldKind::Uint16),
            5 => Some(FieldKind::Int16),
            6 => Some(FieldKind::Uint32),
            7 => Some(FieldKind::Int32),
            8 => Some(FieldKind::Uint64),
            9 => Some(FieldKind::Int64),
            10 => Some(FieldKind::Uint128),
            11 => Some(FieldKind::Int128),
            12 => Some(FieldKind::Uint256),
            13 => Some(FieldKind::Int256),
            14 => Some(FieldKind::Address),
            15 => Some(FieldKind::Bytes32),
            16 => Some(FieldKind::FixedBytes),
            17 => Some(FieldKind::String),
            18 => Some(FieldKind::Bytes),
            19 => Some(FieldKind::Optional),
            20 => Some(FieldKind::Array),
            21 => Some(FieldKind::List),
            22 => Some(FieldKind::Struct),
            _ => None,
        }
    }

    /// Lowercase type name used in labels and declarations ("uint256", ...).
    pub fn type_name(self) -> &'static str {
        match self {
            FieldKind::Void => "void",
            FieldKind::Bool => "bool",
            FieldKind::Uint8 => "uint8",
            FieldKind::Int8 => "int8",
            FieldKind::Uint16 => "uint16",
            FieldKind::Int16 => "int16",
            FieldKind::Uint32 => "uint32",
            FieldKind::Int32 => "int32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Int64 => "int64",
            FieldKind::Uint128 => "uint128",
            FieldKind::Int128 => "int128",
            FieldKind::Uint256 => "uint256",
            FieldKind::Int256 => "int256",
            FieldKind::Address => "address",
            FieldKind::Bytes32 => "bytes32",
            FieldKind::FixedBytes => "fixed_bytes",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Optional => "optional",
            FieldKind::Array => "array",
            FieldKind::List => "list",
            FieldKind::Struct => "struct",
        }
    }

    /// Looks up a kind by its type name.
    pub fn from_type_name(name: &str) -> Option<FieldKind> {
        KIND_BY_NAME.get(name).copied()
    }

    /// Leaf kinds carry no child nodes on the wire.
    pub fn is_leaf(self) -> bool {
        !matches!(
            self,
            FieldKind::Optional | FieldKind::Array | FieldKind::List | FieldKind::Struct
        )
    }
}
