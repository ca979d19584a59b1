//! Application and platform designs.
//!
//! Both kinds of design share one shape: a graph of nodes, the leaf
//! definitions those nodes instantiate, the nodes exported as ports to an
//! enclosing design, and the provenance list of clones imported during
//! flattening. They differ only in which leaf kinds they admit, so a single
//! generic [`Design`] is parameterized by a [`LeafKind`]:
//!
//! - [`Application`] = `Design<ApplicationLeaf>` (processes, constructors,
//!   functions, implementations)
//! - [`Platform`] = `Design<PlatformLeaf>` (computation, communication,
//!   storage)

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::element::{DesignCategory, Scope};
use crate::error::ModelError;
use crate::extras::Scalar;
use crate::graph::node::{Definition, NodeId};
use crate::graph::Graph;
use crate::model::Model;

/// Index of a design among the designs of its kind in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignId(pub usize);

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "design #{}", self.0)
    }
}

/// Index of a leaf definition inside its owning design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeafId(pub usize);

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf #{}", self.0)
    }
}

/// The closed set of leaf kinds admitted by one design category.
pub trait LeafKind:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + 'static
{
    /// The design category whose leaves are of this kind.
    const CATEGORY: DesignCategory;

    /// All designs of this category in a model.
    fn designs(model: &Model) -> &[Design<Self>];

    /// The scope naming the given design of this category.
    fn scope(design: DesignId) -> Scope {
        Scope {
            category: Self::CATEGORY,
            design,
        }
    }
}

/// Leaf definitions of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationLeaf {
    Process,
    Constructor,
    Function,
    Implementation,
}

impl fmt::Display for ApplicationLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationLeaf::Process => write!(f, "process"),
            ApplicationLeaf::Constructor => write!(f, "constructor"),
            ApplicationLeaf::Function => write!(f, "function"),
            ApplicationLeaf::Implementation => write!(f, "implementation"),
        }
    }
}

impl LeafKind for ApplicationLeaf {
    const CATEGORY: DesignCategory = DesignCategory::Application;

    fn designs(model: &Model) -> &[Design<Self>] {
        &model.applications
    }
}

/// Leaf definitions of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformLeaf {
    Computation,
    Communication,
    Storage,
}

impl fmt::Display for PlatformLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformLeaf::Computation => write!(f, "computation"),
            PlatformLeaf::Communication => write!(f, "communication"),
            PlatformLeaf::Storage => write!(f, "storage"),
        }
    }
}

impl LeafKind for PlatformLeaf {
    const CATEGORY: DesignCategory = DesignCategory::Platform;

    fn designs(model: &Model) -> &[Design<Self>] {
        &model.platforms
    }
}

/// A leaf definition: something a node instantiates that has no graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf<L> {
    pub identifier: String,
    pub kind: L,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Scalar>,
}

impl<L> Leaf<L> {
    pub fn new(identifier: impl Into<String>, kind: L) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            properties: BTreeMap::new(),
        }
    }

    /// Attach a scalar property to this leaf.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// An application or platform design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "L: DeserializeOwned"))]
pub struct Design<L> {
    pub identifier: String,
    pub graph: Graph,
    /// Leaf definitions instantiated by this design's nodes.
    #[serde(default)]
    pub leaves: Vec<Leaf<L>>,
    /// Nodes visible as ports to an enclosing design.
    #[serde(default)]
    pub exported: Vec<NodeId>,
    /// Clones substituted into this design during flattening.
    #[serde(default)]
    pub imported: Vec<DesignId>,
}

/// A model of computation.
pub type Application = Design<ApplicationLeaf>;

/// A model of hardware.
pub type Platform = Design<PlatformLeaf>;

impl<L: LeafKind> Design<L> {
    /// Create an empty design with its own empty graph.
    pub fn new(identifier: impl Into<String>, graph_identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            graph: Graph::new(graph_identifier),
            leaves: Vec::new(),
            exported: Vec::new(),
            imported: Vec::new(),
        }
    }

    /// Store a leaf definition in this design.
    pub fn add_leaf(&mut self, leaf: Leaf<L>) -> LeafId {
        self.leaves.push(leaf);
        LeafId(self.leaves.len() - 1)
    }

    pub fn leaf(&self, id: LeafId) -> Option<&Leaf<L>> {
        self.leaves.get(id.0)
    }

    /// Leaf definitions in storage order, with their handles.
    pub fn leaves(&self) -> impl Iterator<Item = (LeafId, &Leaf<L>)> {
        self.leaves.iter().enumerate().map(|(i, l)| (LeafId(i), l))
    }

    /// The typed collection of leaves of one kind.
    pub fn leaves_of(&self, kind: L) -> impl Iterator<Item = &Leaf<L>> {
        self.leaves.iter().filter(move |l| l.kind == kind)
    }

    /// Mark a node of this design as an exported port.
    pub fn export(&mut self, node: NodeId) -> Result<(), ModelError> {
        self.graph.require_node(node)?;
        if !self.exported.contains(&node) {
            self.exported.push(node);
        }
        Ok(())
    }

    pub fn is_exported(&self, node: NodeId) -> bool {
        self.exported.contains(&node)
    }

    /// Designs referenced by this design's nodes, with repetition.
    pub fn nested_definitions(&self) -> impl Iterator<Item = DesignId> + '_ {
        self.graph.nodes().filter_map(|(_, n)| n.definition.nested())
    }

    /// Number of nodes instantiating the given design.
    pub fn references_to(&self, design: DesignId) -> usize {
        self.graph
            .nodes()
            .filter(|(_, n)| n.definition == Definition::Nested(design))
            .count()
    }
}

impl Design<ApplicationLeaf> {
    pub fn processes(&self) -> impl Iterator<Item = &Leaf<ApplicationLeaf>> {
        self.leaves_of(ApplicationLeaf::Process)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Leaf<ApplicationLeaf>> {
        self.leaves_of(ApplicationLeaf::Constructor)
    }

    pub fn functions(&self) -> impl Iterator<Item = &Leaf<ApplicationLeaf>> {
        self.leaves_of(ApplicationLeaf::Function)
    }

    pub fn implementations(&self) -> impl Iterator<Item = &Leaf<ApplicationLeaf>> {
        self.leaves_of(ApplicationLeaf::Implementation)
    }
}

impl Design<PlatformLeaf> {
    pub fn computators(&self) -> impl Iterator<Item = &Leaf<PlatformLeaf>> {
        self.leaves_of(PlatformLeaf::Computation)
    }

    pub fn communicators(&self) -> impl Iterator<Item = &Leaf<PlatformLeaf>> {
        self.leaves_of(PlatformLeaf::Communication)
    }

    pub fn storages(&self) -> impl Iterator<Item = &Leaf<PlatformLeaf>> {
        self.leaves_of(PlatformLeaf::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::Node;

    #[test]
    fn typed_collections() {
        let mut app = Application::new("app", "app_graph");
        app.add_leaf(Leaf::new("p0", ApplicationLeaf::Process));
        app.add_leaf(Leaf::new("p1", ApplicationLeaf::Process));
        app.add_leaf(Leaf::new("f0", ApplicationLeaf::Function));
        assert_eq!(app.processes().count(), 2);
        assert_eq!(app.functions().count(), 1);
        assert_eq!(app.constructors().count(), 0);
        assert_eq!(app.implementations().count(), 0);

        let mut plat = Platform::new("plat", "hw");
        plat.add_leaf(Leaf::new("cpu", PlatformLeaf::Computation));
        plat.add_leaf(Leaf::new("mem", PlatformLeaf::Storage));
        assert_eq!(plat.computators().count(), 1);
        assert_eq!(plat.storages().count(), 1);
        assert_eq!(plat.communicators().count(), 0);
    }

    #[test]
    fn export_requires_existing_node() {
        let mut app = Application::new("app", "g");
        let leaf = app.add_leaf(Leaf::new("p", ApplicationLeaf::Process));
        let n = app.graph.add_node(Node::leaf("n", leaf)).unwrap();
        app.export(n).unwrap();
        app.export(n).unwrap();
        assert_eq!(app.exported, vec![n]);
        assert!(app.is_exported(n));
        assert!(app.export(NodeId(3)).is_err());
    }

    #[test]
    fn nested_reference_counting() {
        let mut plat = Platform::new("board", "g");
        plat.graph.add_node(Node::nested("c0", DesignId(1))).unwrap();
        plat.graph.add_node(Node::nested("c1", DesignId(1))).unwrap();
        plat.graph.add_node(Node::nested("bus", DesignId(2))).unwrap();
        assert_eq!(plat.references_to(DesignId(1)), 2);
        assert_eq!(plat.references_to(DesignId(2)), 1);
        assert_eq!(plat.references_to(DesignId(0)), 0);
        assert_eq!(plat.nested_definitions().count(), 3);
    }

    #[test]
    fn leaf_properties() {
        let leaf = Leaf::new("cpu", PlatformLeaf::Computation).with_property("freq_mhz", 400);
        assert_eq!(leaf.properties.get("freq_mhz"), Some(&Scalar::Int(400)));
        assert_eq!(PlatformLeaf::Computation.to_string(), "computation");
        assert_eq!(ApplicationLeaf::CATEGORY, DesignCategory::Application);
    }
}
