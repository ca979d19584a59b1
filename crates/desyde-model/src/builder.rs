//! Construction API for building designs programmatically.
//!
//! # Example
//!
//! ```rust
//! use desyde_model::builder::DesignBuilder;
//! use desyde_model::design::ApplicationLeaf;
//! use desyde_model::model::Model;
//!
//! let mut model = Model::new();
//!
//! // A reusable filter stage with one exported input.
//! let mut stage = DesignBuilder::new("stage");
//! let input = stage.add_leaf("in", ApplicationLeaf::Process).unwrap();
//! let work = stage.add_leaf("work", ApplicationLeaf::Process).unwrap();
//! stage.connect("in_work", input, work).unwrap();
//! stage.export(input).unwrap();
//! let stage = model.add_application(stage.build());
//!
//! // A pipeline instantiating the stage twice.
//! let mut top = DesignBuilder::new("top");
//! let src = top.add_leaf("src", ApplicationLeaf::Process).unwrap();
//! let s0 = top.add_nested("s0", stage).unwrap();
//! let s1 = top.add_nested("s1", stage).unwrap();
//! top.connect_ports("src_s0", src, None, s0, Some(input)).unwrap();
//! top.connect_ports("src_s1", src, None, s1, Some(input)).unwrap();
//! model.add_application(top.build());
//!
//! assert_eq!(model.applications[1].references_to(stage), 2);
//! ```

use std::collections::HashMap;

use crate::design::{Design, DesignId, Leaf, LeafId, LeafKind};
use crate::error::ModelError;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};

/// A builder for one application or platform design.
///
/// Leaf definitions are keyed by identifier, so several nodes can
/// instantiate the same leaf.
pub struct DesignBuilder<L> {
    design: Design<L>,
    leaves: HashMap<String, LeafId>,
}

impl<L: LeafKind> DesignBuilder<L> {
    /// Start a design whose graph is named `<identifier>_graph`.
    pub fn new(identifier: &str) -> Self {
        Self::with_graph(identifier, &format!("{identifier}_graph"))
    }

    /// Start a design with an explicit graph identifier.
    pub fn with_graph(identifier: &str, graph_identifier: &str) -> Self {
        Self {
            design: Design::new(identifier, graph_identifier),
            leaves: HashMap::new(),
        }
    }

    /// Add a node instantiating a leaf of the same name.
    pub fn add_leaf(&mut self, name: &str, kind: L) -> Result<NodeId, ModelError> {
        self.add_leaf_instance(name, name, kind)
    }

    /// Add a node instantiating a named leaf, creating the leaf on first use.
    pub fn add_leaf_instance(
        &mut self,
        node: &str,
        leaf: &str,
        kind: L,
    ) -> Result<NodeId, ModelError> {
        let leaf_id = match self.leaves.get(leaf) {
            Some(id) => *id,
            None => {
                let id = self.design.add_leaf(Leaf::new(leaf, kind));
                self.leaves.insert(leaf.to_string(), id);
                id
            }
        };
        self.design.graph.add_node(Node::leaf(node, leaf_id))
    }

    /// Add a node instantiating another design of the same kind.
    pub fn add_nested(&mut self, name: &str, design: DesignId) -> Result<NodeId, ModelError> {
        self.design.graph.add_node(Node::nested(name, design))
    }

    /// Connect two nodes.
    pub fn connect(&mut self, name: &str, from: NodeId, to: NodeId) -> Result<EdgeId, ModelError> {
        self.design.graph.add_edge(Edge::new(name, from, to))
    }

    /// Connect two nodes, attaching either end to an exported port of the
    /// design instantiated there.
    pub fn connect_ports(
        &mut self,
        name: &str,
        from: NodeId,
        from_port: Option<NodeId>,
        to: NodeId,
        to_port: Option<NodeId>,
    ) -> Result<EdgeId, ModelError> {
        let mut edge = Edge::new(name, from, to);
        edge.from_exported = from_port;
        edge.to_exported = to_port;
        self.design.graph.add_edge(edge)
    }

    /// Expose a node as a port of this design.
    pub fn export(&mut self, node: NodeId) -> Result<(), ModelError> {
        self.design.export(node)
    }

    /// Add an annotation to a node.
    pub fn annotate(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), ModelError> {
        let graph = self.design.graph.identifier().to_string();
        let node = self
            .design
            .graph
            .node_mut(node)
            .ok_or(ModelError::NodeNotFound { graph, node })?;
        node.annotations.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Look up a node by identifier.
    pub fn get_named(&self, name: &str) -> Option<NodeId> {
        self.design.graph.find_node(name)
    }

    /// Finish construction.
    pub fn build(self) -> Design<L> {
        self.design
    }
}
