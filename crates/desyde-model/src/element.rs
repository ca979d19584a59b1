//! Handles naming any element of a model.
//!
//! Cross-cutting structures (extras tables and the refinement bindings graph)
//! point into application and platform designs. They do so through
//! [`ElementRef`], a typed handle made of a [`Scope`] (which design) and,
//! where relevant, an index into one of that design's arenas.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::design::{DesignId, LeafId};
use crate::graph::edge::EdgeId;
use crate::graph::node::NodeId;

/// The two kinds of design a model holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignCategory {
    Application,
    Platform,
}

impl fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignCategory::Application => write!(f, "application"),
            DesignCategory::Platform => write!(f, "platform"),
        }
    }
}

/// A design of the model, identified by category and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub category: DesignCategory,
    pub design: DesignId,
}

impl Scope {
    pub fn application(design: DesignId) -> Self {
        Self {
            category: DesignCategory::Application,
            design,
        }
    }

    pub fn platform(design: DesignId) -> Self {
        Self {
            category: DesignCategory::Platform,
            design,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.category, self.design.0)
    }
}

/// A reference to an element contained in a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ElementRef {
    /// A whole application or platform design.
    Design { scope: Scope },
    /// A node of a design graph.
    Node { scope: Scope, node: NodeId },
    /// An edge of a design graph.
    Edge { scope: Scope, edge: EdgeId },
    /// A leaf definition of a design.
    Leaf { scope: Scope, leaf: LeafId },
}

impl ElementRef {
    pub fn design(scope: Scope) -> Self {
        ElementRef::Design { scope }
    }

    pub fn node(scope: Scope, node: NodeId) -> Self {
        ElementRef::Node { scope, node }
    }

    pub fn edge(scope: Scope, edge: EdgeId) -> Self {
        ElementRef::Edge { scope, edge }
    }

    pub fn leaf(scope: Scope, leaf: LeafId) -> Self {
        ElementRef::Leaf { scope, leaf }
    }

    /// The design that owns the referenced element.
    pub fn scope(&self) -> Scope {
        match self {
            ElementRef::Design { scope }
            | ElementRef::Node { scope, .. }
            | ElementRef::Edge { scope, .. }
            | ElementRef::Leaf { scope, .. } => *scope,
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Design { scope } => write!(f, "{scope}"),
            ElementRef::Node { scope, node } => write!(f, "{node} of {scope}"),
            ElementRef::Edge { scope, edge } => write!(f, "{edge} of {scope}"),
            ElementRef::Leaf { scope, leaf } => write!(f, "{leaf} of {scope}"),
        }
    }
}
