//! Binding ambiguity check.
//!
//! A binding from the refinement graph names one element. If the design
//! owning that element was cloned several times there is no way to tell
//! which clone the binding meant, so the model is rejected.

use desyde_model::element::ElementRef;
use desyde_model::model::Model;

use crate::error::FlattenError;
use crate::registry::Registries;

/// Reject bindings of the source model that refer into replicated designs.
///
/// Binding node definitions, edge endpoints and exported endpoints are all
/// checked.
pub fn check_bindings(source: &Model, registries: &Registries) -> Result<(), FlattenError> {
    let bindings = &source.refinement.bindings;
    let nodes = bindings
        .nodes
        .iter()
        .map(|n| (n.identifier.as_str(), &n.definition));
    let edges = bindings
        .edges
        .iter()
        .flat_map(|e| e.references().map(move |r| (e.identifier.as_str(), r)));

    for (binding, element) in nodes.chain(edges) {
        check_reference(source, registries, binding, element)?;
    }
    Ok(())
}

fn check_reference(
    source: &Model,
    registries: &Registries,
    binding: &str,
    element: &ElementRef,
) -> Result<(), FlattenError> {
    let scope = element.scope();
    let clones = registries.get(scope.category).clones_of(scope.design).len();
    if clones > 1 {
        return Err(FlattenError::AmbiguousBinding {
            category: scope.category,
            design: source
                .scope_identifier(scope)
                .map(str::to_string)
                .unwrap_or_else(|| scope.to_string()),
            clones,
            binding: binding.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CloneRecord, CloneRegistry};
    use desyde_model::design::{DesignId, Platform};
    use desyde_model::element::{DesignCategory, Scope};
    use desyde_model::graph::node::NodeId;
    use desyde_model::refinement::{BindingEdge, BindingNode};
    use std::collections::BTreeMap;

    fn record(original: usize, index: usize, clone: usize) -> CloneRecord {
        CloneRecord {
            original: DesignId(original),
            index,
            clone: DesignId(clone),
            suffix: String::new(),
            nodes: vec![NodeId(0)],
            edges: Vec::new(),
            leaves: Vec::new(),
            ports: BTreeMap::new(),
        }
    }

    /// Platform 0 cloned twice, platform 1 once, one application.
    fn registries() -> Registries {
        let mut platforms = CloneRegistry::new(DesignCategory::Platform, 2);
        platforms.register(record(0, 0, 0));
        platforms.register(record(0, 1, 1));
        platforms.register(record(1, 0, 2));
        let mut applications = CloneRegistry::new(DesignCategory::Application, 1);
        applications.register(record(0, 0, 0));
        Registries {
            platforms,
            applications,
        }
    }

    fn model() -> Model {
        let mut model = Model::new();
        model.add_platform(Platform::new("core", "core_hw"));
        model.add_platform(Platform::new("board", "board_hw"));
        model
    }

    fn process() -> ElementRef {
        ElementRef::node(Scope::application(DesignId(0)), NodeId(0))
    }

    #[test]
    fn bindings_to_single_instances_pass() {
        let mut model = model();
        let board = ElementRef::node(Scope::platform(DesignId(1)), NodeId(0));
        model
            .refinement
            .bindings
            .edges
            .push(BindingEdge::new("map", process(), board));
        assert!(check_bindings(&model, &registries()).is_ok());
    }

    #[test]
    fn edge_into_replicated_design_fails() {
        let mut model = model();
        let core = ElementRef::node(Scope::platform(DesignId(0)), NodeId(0));
        model
            .refinement
            .bindings
            .edges
            .push(BindingEdge::new("map", process(), core));
        match check_bindings(&model, &registries()) {
            Err(FlattenError::AmbiguousBinding {
                design,
                clones,
                binding,
                ..
            }) => {
                assert_eq!(design, "core");
                assert_eq!(clones, 2);
                assert_eq!(binding, "map");
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn exported_endpoint_into_replicated_design_fails() {
        let mut model = model();
        let board = ElementRef::node(Scope::platform(DesignId(1)), NodeId(0));
        let mut edge = BindingEdge::new("map", process(), board);
        edge.to_exported = Some(ElementRef::node(Scope::platform(DesignId(0)), NodeId(0)));
        model.refinement.bindings.edges.push(edge);
        assert!(check_bindings(&model, &registries()).is_err());
    }

    #[test]
    fn binding_node_naming_replicated_design_fails() {
        let mut model = model();
        model.refinement.bindings.nodes.push(BindingNode {
            identifier: "core_ref".into(),
            definition: ElementRef::design(Scope::platform(DesignId(0))),
        });
        assert!(matches!(
            check_bindings(&model, &registries()),
            Err(FlattenError::AmbiguousBinding { .. })
        ));
    }
}
