//! In-memory model of hierarchical DeSyDe system designs.
//!
//! A [`Model`] holds application designs (models of computation), platform
//! designs (models of hardware), extras tables annotating their elements, and
//! a refinement bindings graph linking applications to platforms. Designs may
//! instantiate other designs of the same kind through nested nodes; the
//! `desyde-flatten` crate elaborates such hierarchies into flat models.
//!
//! All intra-model links are index handles into arenas owned by the model:
//! [`DesignId`], [`NodeId`], [`EdgeId`], [`LeafId`], and the cross-scope
//! [`ElementRef`].

pub mod builder;
pub mod design;
pub mod element;
pub mod error;
pub mod extras;
pub mod graph;
pub mod hash;
pub mod model;
pub mod refinement;

pub use builder::DesignBuilder;
pub use design::{
    Application, ApplicationLeaf, Design, DesignId, Leaf, LeafId, LeafKind, Platform, PlatformLeaf,
};
pub use element::{DesignCategory, ElementRef, Scope};
pub use error::ModelError;
pub use extras::{Extras, Scalar, Table, TableEntry};
pub use graph::edge::{Edge, EdgeId, Endpoint};
pub use graph::node::{Definition, Node, NodeId};
pub use graph::Graph;
pub use hash::{content_hash, hash_hex, ContentHash};
pub use model::Model;
pub use refinement::{BindingEdge, BindingGraph, BindingNode, Refinement};
