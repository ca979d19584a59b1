//! The clone registry.
//!
//! Every clone made during flattening is recorded together with the handle
//! maps that relate the original design's nodes, edges, leaves and exported
//! ports to the clone's. Later stages resolve elements through these maps
//! rather than through identifiers.

use std::collections::BTreeMap;

use desyde_model::design::{DesignId, LeafId};
use desyde_model::element::{DesignCategory, ElementRef, Scope};
use desyde_model::graph::edge::EdgeId;
use desyde_model::graph::node::NodeId;

use crate::error::FlattenError;

/// One clone of an original design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRecord {
    pub original: DesignId,
    /// Position of this clone among the clones of its original.
    pub index: usize,
    /// Handle of the clone in the flattened model.
    pub clone: DesignId,
    pub suffix: String,
    /// Clone node for every original node, by original index.
    pub nodes: Vec<NodeId>,
    /// Clone edge for every original edge, by original index.
    pub edges: Vec<EdgeId>,
    /// Clone leaf for every original leaf, by original index.
    pub leaves: Vec<LeafId>,
    /// Original exported node to the clone's exported node.
    pub ports: BTreeMap<NodeId, NodeId>,
}

impl CloneRecord {
    /// The clone's copy of an exported node of the original.
    pub fn port(&self, original: NodeId) -> Option<NodeId> {
        self.ports.get(&original).copied()
    }

    /// The clone's copy of an element of the original design.
    ///
    /// The caller is responsible for `element` belonging to the original.
    pub fn counterpart(&self, category: DesignCategory, element: &ElementRef) -> Option<ElementRef> {
        let scope = Scope {
            category,
            design: self.clone,
        };
        match element {
            ElementRef::Design { .. } => Some(ElementRef::design(scope)),
            ElementRef::Node { node, .. } => self
                .nodes
                .get(node.0)
                .map(|n| ElementRef::node(scope, *n)),
            ElementRef::Edge { edge, .. } => self
                .edges
                .get(edge.0)
                .map(|e| ElementRef::edge(scope, *e)),
            ElementRef::Leaf { leaf, .. } => self
                .leaves
                .get(leaf.0)
                .map(|l| ElementRef::leaf(scope, *l)),
        }
    }
}

/// All clones of one design category.
#[derive(Debug, Clone)]
pub struct CloneRegistry {
    category: DesignCategory,
    by_original: Vec<Vec<CloneRecord>>,
    origin: BTreeMap<DesignId, (DesignId, usize)>,
}

impl CloneRegistry {
    /// An empty registry for `originals` source designs.
    pub fn new(category: DesignCategory, originals: usize) -> Self {
        Self {
            category,
            by_original: vec![Vec::new(); originals],
            origin: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> DesignCategory {
        self.category
    }

    /// Record a clone. Records of one original must arrive in index order.
    pub fn register(&mut self, record: CloneRecord) {
        if self.by_original.len() <= record.original.0 {
            self.by_original
                .resize_with(record.original.0 + 1, Vec::new);
        }
        self.origin
            .insert(record.clone, (record.original, record.index));
        self.by_original[record.original.0].push(record);
    }

    /// Clones of an original design, in index order.
    pub fn clones_of(&self, original: DesignId) -> &[CloneRecord] {
        self.by_original
            .get(original.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The record of a design of the flattened model.
    pub fn record_for(&self, clone: DesignId) -> Option<&CloneRecord> {
        let (original, index) = self.origin.get(&clone)?;
        self.by_original.get(original.0)?.get(*index)
    }

    /// Whether an original design was cloned more than once.
    pub fn is_replicated(&self, original: DesignId) -> bool {
        self.clones_of(original).len() > 1
    }

    /// Total number of clones recorded.
    pub fn clone_count(&self) -> usize {
        self.origin.len()
    }

    /// Every flattened counterpart of an element of the source model, one
    /// per clone of its owning design.
    pub fn counterparts(&self, element: &ElementRef) -> Result<Vec<ElementRef>, FlattenError> {
        let scope = element.scope();
        let clones = self.clones_of(scope.design);
        if scope.category != self.category || clones.is_empty() {
            return Err(FlattenError::UnresolvedReference(*element));
        }
        clones
            .iter()
            .map(|record| {
                record
                    .counterpart(self.category, element)
                    .ok_or(FlattenError::UnresolvedReference(*element))
            })
            .collect()
    }
}

/// Clone registries of both design categories.
#[derive(Debug, Clone)]
pub struct Registries {
    pub platforms: CloneRegistry,
    pub applications: CloneRegistry,
}

impl Registries {
    pub fn get(&self, category: DesignCategory) -> &CloneRegistry {
        match category {
            DesignCategory::Application => &self.applications,
            DesignCategory::Platform => &self.platforms,
        }
    }

    /// Resolve an element against the registry of its own category.
    pub fn counterparts(&self, element: &ElementRef) -> Result<Vec<ElementRef>, FlattenError> {
        self.get(element.scope().category).counterparts(element)
    }
}
