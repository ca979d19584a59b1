//! The model container: designs of both kinds, extras, and refinement.

use serde::{Deserialize, Serialize};

use crate::design::{Application, Design, DesignId, LeafKind, Platform};
use crate::element::{DesignCategory, ElementRef, Scope};
use crate::error::ModelError;
use crate::extras::Extras;
use crate::refinement::Refinement;

/// A complete system-design model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub extras: Extras,
    #[serde(default)]
    pub refinement: Refinement,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an application design, returning its handle.
    pub fn add_application(&mut self, application: Application) -> DesignId {
        self.applications.push(application);
        DesignId(self.applications.len() - 1)
    }

    /// Append a platform design, returning its handle.
    pub fn add_platform(&mut self, platform: Platform) -> DesignId {
        self.platforms.push(platform);
        DesignId(self.platforms.len() - 1)
    }

    /// Look up a design of a statically known kind.
    pub fn design<L: LeafKind>(&self, id: DesignId) -> Option<&Design<L>> {
        L::designs(self).get(id.0)
    }

    /// Identifier of a design named by scope.
    pub fn scope_identifier(&self, scope: Scope) -> Option<&str> {
        match scope.category {
            DesignCategory::Application => self
                .applications
                .get(scope.design.0)
                .map(|d| d.identifier.as_str()),
            DesignCategory::Platform => self
                .platforms
                .get(scope.design.0)
                .map(|d| d.identifier.as_str()),
        }
    }

    /// Identifier of any referenced element, or `None` for a stale handle.
    pub fn identifier_of(&self, element: &ElementRef) -> Option<&str> {
        match element.scope().category {
            DesignCategory::Application => {
                identifier_in(self.applications.get(element.scope().design.0)?, element)
            }
            DesignCategory::Platform => {
                identifier_in(self.platforms.get(element.scope().design.0)?, element)
            }
        }
    }

    /// Like [`Model::identifier_of`], failing on stale handles.
    pub fn require_identifier(&self, element: &ElementRef) -> Result<&str, ModelError> {
        self.identifier_of(element)
            .ok_or(ModelError::DanglingReference(*element))
    }

    /// Every element contained in the model, platforms first.
    ///
    /// For each design: the design itself, then its nodes, edges and leaves
    /// in storage order.
    pub fn elements(&self) -> Vec<ElementRef> {
        let mut out = Vec::new();
        for (i, platform) in self.platforms.iter().enumerate() {
            collect_elements(platform, Scope::platform(DesignId(i)), &mut out);
        }
        for (i, application) in self.applications.iter().enumerate() {
            collect_elements(application, Scope::application(DesignId(i)), &mut out);
        }
        out
    }
}

fn identifier_in<'a, L: LeafKind>(design: &'a Design<L>, element: &ElementRef) -> Option<&'a str> {
    match element {
        ElementRef::Design { .. } => Some(design.identifier.as_str()),
        ElementRef::Node { node, .. } => design.graph.node(*node).map(|n| n.identifier.as_str()),
        ElementRef::Edge { edge, .. } => design.graph.edge(*edge).map(|e| e.identifier.as_str()),
        ElementRef::Leaf { leaf, .. } => design.leaf(*leaf).map(|l| l.identifier.as_str()),
    }
}

fn collect_elements<L: LeafKind>(design: &Design<L>, scope: Scope, out: &mut Vec<ElementRef>) {
    out.push(ElementRef::design(scope));
    out.extend(design.graph.nodes().map(|(id, _)| ElementRef::node(scope, id)));
    out.extend(design.graph.edges().map(|(id, _)| ElementRef::edge(scope, id)));
    out.extend(design.leaves().map(|(id, _)| ElementRef::leaf(scope, id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{ApplicationLeaf, Leaf, LeafId, PlatformLeaf};
    use crate::graph::edge::{Edge, EdgeId};
    use crate::graph::node::{Node, NodeId};

    fn small_model() -> Model {
        let mut model = Model::new();

        let mut plat = Platform::new("board", "board_hw");
        let cpu = plat.add_leaf(Leaf::new("cpu", PlatformLeaf::Computation));
        plat.graph.add_node(Node::leaf("cpu0", cpu)).unwrap();
        model.add_platform(plat);

        let mut app = Application::new("app", "app_net");
        let p = app.add_leaf(Leaf::new("proc", ApplicationLeaf::Process));
        let a = app.graph.add_node(Node::leaf("a", p)).unwrap();
        let b = app.graph.add_node(Node::leaf("b", p)).unwrap();
        app.graph.add_edge(Edge::new("ab", a, b)).unwrap();
        model.add_application(app);
        model
    }

    #[test]
    fn identifier_lookup() {
        let model = small_model();
        let app = Scope::application(DesignId(0));
        let plat = Scope::platform(DesignId(0));
        assert_eq!(model.identifier_of(&ElementRef::design(app)), Some("app"));
        assert_eq!(model.identifier_of(&ElementRef::node(app, NodeId(1))), Some("b"));
        assert_eq!(model.identifier_of(&ElementRef::edge(app, EdgeId(0))), Some("ab"));
        assert_eq!(model.identifier_of(&ElementRef::leaf(plat, LeafId(0))), Some("cpu"));
        assert_eq!(model.scope_identifier(plat), Some("board"));
    }

    #[test]
    fn stale_handles_are_reported() {
        let model = small_model();
        let missing = ElementRef::node(Scope::application(DesignId(0)), NodeId(7));
        assert!(model.identifier_of(&missing).is_none());
        assert!(matches!(
            model.require_identifier(&missing),
            Err(ModelError::DanglingReference(_))
        ));
        assert!(model
            .identifier_of(&ElementRef::design(Scope::platform(DesignId(3))))
            .is_none());
    }

    #[test]
    fn elements_walk_everything() {
        let model = small_model();
        let elements = model.elements();
        // platform: design + 1 node + 1 leaf; application: design + 2 nodes + 1 edge + 1 leaf
        assert_eq!(elements.len(), 3 + 5);
        assert_eq!(elements[0], ElementRef::design(Scope::platform(DesignId(0))));
        assert!(elements
            .iter()
            .all(|e| model.identifier_of(e).is_some()));
    }

    #[test]
    fn typed_design_lookup() {
        let model = small_model();
        assert!(model.design::<PlatformLeaf>(DesignId(0)).is_some());
        assert!(model.design::<ApplicationLeaf>(DesignId(1)).is_none());
    }

    #[test]
    fn json_round_trip_keeps_structure() {
        let model = small_model();
        let json = serde_json::to_string(&model).unwrap();
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn reads_designs_with_leaves_from_json() {
        let json = r#"{
            "platforms": [{
                "identifier": "board",
                "graph": {
                    "identifier": "board_hw",
                    "nodes": [
                        { "identifier": "cpu0", "definition": { "leaf": 0 } },
                        { "identifier": "mem0", "definition": { "leaf": 1 } }
                    ],
                    "edges": [{ "identifier": "bus", "from": 0, "to": 1 }]
                },
                "leaves": [
                    { "identifier": "cpu", "kind": "computation" },
                    { "identifier": "mem", "kind": "storage", "properties": { "size": 1024 } }
                ]
            }],
            "applications": [{
                "identifier": "app",
                "graph": { "identifier": "app_net" }
            }]
        }"#;

        let model: Model = serde_json::from_str(json).unwrap();
        let board = &model.platforms[0];
        assert_eq!(board.leaves.len(), 2);
        assert_eq!(board.storages().count(), 1);
        assert!(board.exported.is_empty());
        assert!(model.applications[0].leaves.is_empty());
        assert_eq!(
            model.identifier_of(&ElementRef::leaf(Scope::platform(DesignId(0)), LeafId(1))),
            Some("mem")
        );
    }
}
