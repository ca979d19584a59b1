//! Refinement: the bindings graph linking applications to platforms.
//!
//! Binding nodes name a model element they stand for; binding edges connect
//! elements across design scopes (for instance a process node to the
//! computation node it must be mapped onto).

use serde::{Deserialize, Serialize};

use crate::element::ElementRef;

/// A node of the bindings graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingNode {
    pub identifier: String,
    pub definition: ElementRef,
}

/// An edge of the bindings graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEdge {
    pub identifier: String,
    pub from: ElementRef,
    pub to: ElementRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_exported: Option<ElementRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_exported: Option<ElementRef>,
}

impl BindingEdge {
    pub fn new(identifier: impl Into<String>, from: ElementRef, to: ElementRef) -> Self {
        Self {
            identifier: identifier.into(),
            from,
            to,
            from_exported: None,
            to_exported: None,
        }
    }

    /// Every element this edge touches.
    pub fn references(&self) -> impl Iterator<Item = &ElementRef> {
        [Some(&self.from), Some(&self.to)]
            .into_iter()
            .chain([self.from_exported.as_ref(), self.to_exported.as_ref()])
            .flatten()
    }

    /// Mutable access to every element this edge touches.
    pub fn references_mut(&mut self) -> impl Iterator<Item = &mut ElementRef> {
        [Some(&mut self.from), Some(&mut self.to)]
            .into_iter()
            .chain([self.from_exported.as_mut(), self.to_exported.as_mut()])
            .flatten()
    }
}

/// The cross-cutting bindings graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingGraph {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub nodes: Vec<BindingNode>,
    #[serde(default)]
    pub edges: Vec<BindingEdge>,
}

impl BindingGraph {
    /// Every element referenced by a binding node or edge.
    pub fn references(&self) -> impl Iterator<Item = &ElementRef> {
        self.nodes
            .iter()
            .map(|n| &n.definition)
            .chain(self.edges.iter().flat_map(BindingEdge::references))
    }
}

/// The refinement container of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    #[serde(default)]
    pub bindings: BindingGraph,
}
