//! Design graphs: ordered nodes, ordered edges, and an identifier.
//!
//! Nodes and edges live in arenas owned by the graph and are addressed by
//! index handles ([`NodeId`], [`EdgeId`]). Edge endpoints and exported-port
//! links are therefore plain aliases into an arena, never ownership.

pub mod edge;
pub mod node;

use serde::{Deserialize, Serialize};

use self::edge::{Edge, EdgeId};
use self::node::{Node, NodeId};
use crate::error::ModelError;

/// The graph of a single application or platform design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    identifier: String,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Append a node. Node identifiers must be unique within the graph.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, ModelError> {
        if self.nodes.iter().any(|n| n.identifier == node.identifier) {
            return Err(ModelError::DuplicateNode {
                graph: self.identifier.clone(),
                identifier: node.identifier,
            });
        }
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Append an edge. Both endpoints must already be in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, ModelError> {
        if self.edges.iter().any(|e| e.identifier == edge.identifier) {
            return Err(ModelError::DuplicateEdge {
                graph: self.identifier.clone(),
                identifier: edge.identifier,
            });
        }
        if self.node(edge.from).is_none() || self.node(edge.to).is_none() {
            return Err(ModelError::DanglingEdge {
                graph: self.identifier.clone(),
                identifier: edge.identifier,
                src: edge.from,
                dst: edge.to,
            });
        }
        self.edges.push(edge);
        Ok(EdgeId(self.edges.len() - 1))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0)
    }

    /// Look up a node, failing with a model error when the handle is stale.
    pub fn require_node(&self, id: NodeId) -> Result<&Node, ModelError> {
        self.node(id).ok_or_else(|| ModelError::NodeNotFound {
            graph: self.identifier.clone(),
            node: id,
        })
    }

    /// Look up an edge, failing with a model error when the handle is stale.
    pub fn require_edge(&self, id: EdgeId) -> Result<&Edge, ModelError> {
        self.edge(id).ok_or_else(|| ModelError::EdgeNotFound {
            graph: self.identifier.clone(),
            edge: id,
        })
    }

    /// Find a node by identifier.
    pub fn find_node(&self, identifier: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.identifier == identifier)
            .map(NodeId)
    }

    /// Find an edge by identifier.
    pub fn find_edge(&self, identifier: &str) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| e.identifier == identifier)
            .map(EdgeId)
    }

    /// Nodes in insertion order, with their handles.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Edges in insertion order, with their handles.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
