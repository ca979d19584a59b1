//! Edges between nodes of one design graph.
//!
//! An edge connects two nodes of the same graph. When an endpoint node
//! instantiates a nested design, the edge may additionally name which of
//! that design's exported nodes it attaches to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Index of an edge inside its owning graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge #{}", self.0)
    }
}

/// Which end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::From => write!(f, "from"),
            Endpoint::To => write!(f, "to"),
        }
    }
}

/// An edge in a design graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier, unique within the owning graph.
    pub identifier: String,
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Exported node of the design instantiated by `from`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_exported: Option<NodeId>,
    /// Exported node of the design instantiated by `to`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_exported: Option<NodeId>,
}

impl Edge {
    /// Create a plain edge between two nodes.
    pub fn new(identifier: impl Into<String>, from: NodeId, to: NodeId) -> Self {
        Self {
            identifier: identifier.into(),
            from,
            to,
            from_exported: None,
            to_exported: None,
        }
    }

    /// Attach the source end to an exported node of the nested design.
    pub fn with_from_exported(mut self, port: NodeId) -> Self {
        self.from_exported = Some(port);
        self
    }

    /// Attach the target end to an exported node of the nested design.
    pub fn with_to_exported(mut self, port: NodeId) -> Self {
        self.to_exported = Some(port);
        self
    }

    /// The node at the given end.
    pub fn node(&self, end: Endpoint) -> NodeId {
        match end {
            Endpoint::From => self.from,
            Endpoint::To => self.to,
        }
    }

    /// The exported port at the given end, if any.
    pub fn exported(&self, end: Endpoint) -> Option<NodeId> {
        match end {
            Endpoint::From => self.from_exported,
            Endpoint::To => self.to_exported,
        }
    }

    /// Mutable access to the exported port at the given end.
    pub fn exported_mut(&mut self, end: Endpoint) -> &mut Option<NodeId> {
        match end {
            Endpoint::From => &mut self.from_exported,
            Endpoint::To => &mut self.to_exported,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}: {} -> {})", self.identifier, self.from, self.to)
    }
}
