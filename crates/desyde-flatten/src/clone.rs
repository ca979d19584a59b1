//! Scoped cloning of design definitions.
//!
//! A design needing `n > 1` instances is copied `n` times with the suffixes
//! `--0` to `--{n-1}` appended to every identifier it owns; a design needing
//! one instance is copied once without a suffix. Nested references inside a
//! clone still point at original designs until substitution rewires them.

use std::collections::BTreeMap;

use desyde_model::design::{Design, DesignId, LeafId, LeafKind};
use desyde_model::element::ElementRef;
use desyde_model::graph::node::{Definition, NodeId};

use crate::error::FlattenError;
use crate::multiplicity::Multiplicities;
use crate::registry::{CloneRecord, CloneRegistry};
use crate::TRACING_TARGET;

/// Identifier suffix of clone `index` out of `count`.
pub fn suffix(count: usize, index: usize) -> String {
    if count > 1 {
        format!("--{index}")
    } else {
        String::new()
    }
}

/// Copy one design, suffixing every identifier it owns.
///
/// `original` is the design's handle in the source model and `clone` the
/// handle the copy will receive in the flattened model.
pub fn clone_design<L: LeafKind>(
    design: &Design<L>,
    original: DesignId,
    clone: DesignId,
    index: usize,
    suffix: &str,
) -> Result<(Design<L>, CloneRecord), FlattenError> {
    let scope = L::scope(original);
    let mut copy = Design::new(
        format!("{}{suffix}", design.identifier),
        format!("{}{suffix}", design.graph.identifier()),
    );

    let mut leaves = Vec::with_capacity(design.leaves.len());
    for leaf in &design.leaves {
        let mut leaf = leaf.clone();
        leaf.identifier.push_str(suffix);
        leaves.push(copy.add_leaf(leaf));
    }

    let mut nodes = Vec::with_capacity(design.graph.node_count());
    for (_, node) in design.graph.nodes() {
        let mut node = node.clone();
        node.identifier.push_str(suffix);
        if let Definition::Leaf(leaf) = node.definition {
            node.definition = Definition::Leaf(map_leaf(&leaves, leaf).ok_or(
                FlattenError::UnresolvedReference(ElementRef::leaf(scope, leaf)),
            )?);
        }
        nodes.push(copy.graph.add_node(node)?);
    }

    let map_node = |id: NodeId| {
        nodes
            .get(id.0)
            .copied()
            .ok_or(FlattenError::UnresolvedReference(ElementRef::node(scope, id)))
    };

    let mut edges = Vec::with_capacity(design.graph.edge_count());
    for (_, edge) in design.graph.edges() {
        let mut edge = edge.clone();
        edge.identifier.push_str(suffix);
        edge.from = map_node(edge.from)?;
        edge.to = map_node(edge.to)?;
        edges.push(copy.graph.add_edge(edge)?);
    }

    let mut ports = BTreeMap::new();
    for exported in &design.exported {
        let port = map_node(*exported)?;
        copy.exported.push(port);
        ports.insert(*exported, port);
    }

    let record = CloneRecord {
        original,
        index,
        clone,
        suffix: suffix.to_string(),
        nodes,
        edges,
        leaves,
        ports,
    };
    Ok((copy, record))
}

fn map_leaf(leaves: &[LeafId], leaf: LeafId) -> Option<LeafId> {
    leaves.get(leaf.0).copied()
}

/// Clone every design of one category as often as its multiplicity says.
///
/// Clones of one original are contiguous and in index order; originals keep
/// their source order.
pub fn clone_all<L: LeafKind>(
    designs: &[Design<L>],
    counts: &Multiplicities,
) -> Result<(Vec<Design<L>>, CloneRegistry), FlattenError> {
    let mut clones = Vec::with_capacity(counts.total());
    let mut registry = CloneRegistry::new(L::CATEGORY, designs.len());

    for (i, design) in designs.iter().enumerate() {
        let count = counts.get(DesignId(i));
        for index in 0..count {
            let suffix = suffix(count, index);
            let clone = DesignId(clones.len());
            let (copy, record) = clone_design(design, DesignId(i), clone, index, &suffix)?;
            tracing::trace!(
                target: TRACING_TARGET,
                category = %L::CATEGORY,
                original = %design.identifier,
                clone = %copy.identifier,
                "cloned design"
            );
            clones.push(copy);
            registry.register(record);
        }
    }

    Ok((clones, registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use desyde_model::builder::DesignBuilder;
    use desyde_model::design::{Application, ApplicationLeaf};

    fn filter() -> Application {
        let mut b = DesignBuilder::new("filter");
        let input = b.add_leaf("in", ApplicationLeaf::Process).unwrap();
        let a = b
            .add_leaf_instance("a", "kernel", ApplicationLeaf::Function)
            .unwrap();
        let c = b
            .add_leaf_instance("c", "kernel", ApplicationLeaf::Function)
            .unwrap();
        b.connect("in_a", input, a).unwrap();
        b.connect("a_c", a, c).unwrap();
        b.export(input).unwrap();
        b.build()
    }

    #[test]
    fn suffixes() {
        assert_eq!(suffix(1, 0), "");
        assert_eq!(suffix(3, 0), "--0");
        assert_eq!(suffix(3, 2), "--2");
    }

    #[test]
    fn clone_suffixes_every_identifier() {
        let original = filter();
        let (copy, record) = clone_design(&original, DesignId(0), DesignId(4), 1, "--1").unwrap();

        assert_eq!(copy.identifier, "filter--1");
        assert_eq!(copy.graph.identifier(), "filter_graph--1");
        let nodes: Vec<_> = copy.graph.nodes().map(|(_, n)| n.identifier.as_str()).collect();
        assert_eq!(nodes, vec!["in--1", "a--1", "c--1"]);
        let edges: Vec<_> = copy.graph.edges().map(|(_, e)| e.identifier.as_str()).collect();
        assert_eq!(edges, vec!["in_a--1", "a_c--1"]);
        let leaves: Vec<_> = copy.leaves.iter().map(|l| l.identifier.as_str()).collect();
        assert_eq!(leaves, vec!["in--1", "kernel--1"]);
        assert!(copy.imported.is_empty());

        assert_eq!(record.clone, DesignId(4));
        assert_eq!(record.index, 1);
        assert_eq!(record.suffix, "--1");
    }

    #[test]
    fn shared_leaf_cloned_once() {
        let original = filter();
        let (copy, _) = clone_design(&original, DesignId(0), DesignId(0), 0, "--0").unwrap();
        assert_eq!(copy.functions().count(), 1);
        let a = copy.graph.find_node("a--0").unwrap();
        let c = copy.graph.find_node("c--0").unwrap();
        assert_eq!(
            copy.graph.node(a).unwrap().definition,
            copy.graph.node(c).unwrap().definition
        );
    }

    #[test]
    fn edges_and_ports_relinked() {
        let original = filter();
        let (copy, record) = clone_design(&original, DesignId(0), DesignId(0), 0, "--0").unwrap();
        let (_, edge) = copy.graph.edges().next().unwrap();
        assert_eq!(copy.graph.node(edge.from).unwrap().identifier, "in--0");
        assert_eq!(copy.graph.node(edge.to).unwrap().identifier, "a--0");
        assert_eq!(copy.exported.len(), 1);
        assert_eq!(record.port(NodeId(0)), Some(copy.exported[0]));
    }

    #[test]
    fn source_is_untouched() {
        let original = filter();
        let before = original.clone();
        let _ = clone_design(&original, DesignId(0), DesignId(0), 0, "--0").unwrap();
        assert_eq!(original, before);
    }

    #[test]
    fn clone_all_is_contiguous() {
        let mut top = DesignBuilder::new("top");
        top.add_nested("f0", DesignId(0)).unwrap();
        top.add_nested("f1", DesignId(0)).unwrap();
        let designs = vec![filter(), top.build()];
        let counts = crate::multiplicity::resolve(&designs).unwrap();

        let (clones, registry) = clone_all(&designs, &counts).unwrap();
        let names: Vec<_> = clones.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(names, vec!["filter--0", "filter--1", "top"]);
        assert_eq!(registry.clones_of(DesignId(0)).len(), 2);
        assert_eq!(registry.clones_of(DesignId(1))[0].clone, DesignId(2));
        // nested references still point at originals
        let top = &clones[2];
        assert!(top
            .graph
            .nodes()
            .all(|(_, n)| n.definition == Definition::Nested(DesignId(0))));
    }
}
