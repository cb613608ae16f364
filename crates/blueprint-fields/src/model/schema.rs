//! Schema type trees.
//!
//! A schema is an ordered list of [`FieldNode`] trees describing a job's
//! parameters or results. Schemas are authored once, encoded at
//! registration time, and stored immutably by an external registry; a
//! schema change requires registering a new job or blueprint version.

use crate::model::FieldKind;

/// A node in a schema type tree.
///
/// Leaf kinds carry no children. `Optional`, `Array`, and `List` carry
/// exactly one child describing the wrapped or element type; `Struct`
/// carries one child per declared field. `array_length` is the element
/// count for `Array` and the byte width for `FixedBytes`, zero otherwise.
/// `name` is populated only under encoding version 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub kind: FieldKind,
    pub array_length: u16,
    pub children: Vec<FieldNode>,
    pub name: Option<String>,
}

impl FieldNode {
    /// Creates a leaf node (no children).
    pub fn leaf(kind: FieldKind) -> FieldNode {
        debug_assert!(kind.is_leaf(), "composite kinds need children");
        FieldNode {
            kind,
            array_length: 0,
            children: Vec::new(),
            name: None,
        }
    }

    /// Creates a fixed-width byte string node of `width` bytes.
    pub fn fixed_bytes(width: u16) -> FieldNode {
        FieldNode {
            kind: FieldKind::FixedBytes,
            array_length: width,
            children: Vec::new(),
            name: None,
        }
    }

    /// Wraps a type in an optional.
    pub fn optional(inner: FieldNode) -> FieldNode {
        FieldNode {
            kind: FieldKind::Optional,
            array_length: 0,
            children: vec![inner],
            name: None,
        }
    }

    /// Creates a fixed-size array of `length` elements.
    ///
    /// The element type always travels as the node's single child; an
    /// array without its element type is not a valid schema.
    pub fn array(length: u16, element: FieldNode) -> FieldNode {
        FieldNode {
            kind: FieldKind::Array,
            array_length: length,
            children: vec![element],
            name: None,
        }
    }

    /// Creates a dynamic-size list.
    pub fn list(element: FieldNode) -> FieldNode {
        FieldNode {
            kind: FieldKind::List,
            array_length: 0,
            children: vec![element],
            name: None,
        }
    }

    /// Creates a struct with one child per declared field.
    pub fn structure(fields: Vec<FieldNode>) -> FieldNode {
        FieldNode {
            kind: FieldKind::Struct,
            array_length: 0,
            children: fields,
            name: None,
        }
    }

    /// Attaches a field name (written only by version 2 encodings).
    pub fn named(mut self, name: impl Into<String>) -> FieldNode {
        self.name = Some(name.into());
        self
    }

    /// Checks the child-arity invariants for this node alone.
    ///
    /// Returns a description of the violation, if any. The schema encoder
    /// rejects invalid nodes outright; it never substitutes a default
    /// element type.
    pub(crate) fn validate_arity(&self) -> Result<(), &'static str> {
        if self.kind.is_leaf() {
            if !self.children.is_empty() {
                return Err("leaf kind cannot carry children");
            }
            if self.kind == FieldKind::FixedBytes && self.array_length == 0 {
                return Err("fixed_bytes width must be nonzero");
            }
            return Ok(());
        }
        match self.kind {
            FieldKind::Optional if self.children.len() != 1 => {
                Err("optional must wrap exactly one child")
            }
            FieldKind::Array | FieldKind::List if self.children.len() != 1 => {
                Err("array/list must declare exactly one element type")
            }
            _ => Ok(()),
        }
    }

    /// Recursive display label for the node's type.
    ///
    /// Leaves render as their kind name; composites recurse:
    /// `list<uint256>`, `array[4]<uint8>`, `optional<string>`,
    /// `struct{recipient: address, amount: uint256}`.
    pub fn type_label(&self) -> String {
        match self.kind {
            FieldKind::FixedBytes => format!("fixed_bytes[{}]", self.array_length),
            FieldKind::Optional => match self.children.first() {
                Some(child) => format!("optional<{}>", child.type_label()),
                None => "optional<?>".to_string(),
            },
            FieldKind::Array => match self.children.first() {
                Some(child) => format!("array[{}]<{}>", self.array_length, child.type_label()),
                None => format!("array[{}]<?>", self.array_length),
            },
            FieldKind::List => match self.children.first() {
                Some(child) => format!("list<{}>", child.type_label()),
                None => "list<?>".to_string(),
            },
            FieldKind::Struct => {
                let fields: Vec<String> = self
                    .children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| argument_label(child, i))
                    .collect();
                format!("struct{{{}}}", fields.join(", "))
            }
            kind => kind.type_name().to_string(),
        }
    }
}

/// Renders `"name: type"` for a schema field, falling back to a positional
/// `"arg_N: type"` label when the field carries no name.
pub fn argument_label(node: &FieldNode, index: usize) -> String {
    match node.name.as_deref() {
        Some(name) if !name.is_empty() => format!("{}: {}", name, node.type_label()),
        _ => format!("arg_{}: {}", index + 1, node.type_label()),
    }
}
