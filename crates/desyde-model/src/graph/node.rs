//! Node handles, definitions, and the Node struct.
//!
//! A node is one instantiation site inside a design's graph. What it
//! instantiates is its [`Definition`]: either a leaf owned by the same
//! design, or another design of the same kind that is referenced, never
//! owned.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::design::{DesignId, LeafId};

/// Index of a node inside its owning graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// What a node instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Definition {
    /// A leaf definition stored in the owning design.
    Leaf(LeafId),
    /// Another design of the same kind.
    Nested(DesignId),
}

impl Definition {
    /// The referenced design, if this is a nested definition.
    pub fn nested(&self) -> Option<DesignId> {
        match self {
            Definition::Nested(id) => Some(*id),
            Definition::Leaf(_) => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Definition::Nested(_))
    }
}

/// A node in a design graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within the owning graph.
    pub identifier: String,
    /// The definition this node instantiates.
    pub definition: Definition,
    /// Free-form metadata carried through flattening untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Node {
    /// Create a node instantiating a leaf definition.
    pub fn leaf(identifier: impl Into<String>, leaf: LeafId) -> Self {
        Self {
            identifier: identifier.into(),
            definition: Definition::Leaf(leaf),
            annotations: BTreeMap::new(),
        }
    }

    /// Create a node instantiating another design.
    pub fn nested(identifier: impl Into<String>, design: DesignId) -> Self {
        Self {
            identifier: identifier.into(),
            definition: Definition::Nested(design),
            annotations: BTreeMap::new(),
        }
    }

    /// Attach an annotation to this node.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}
