//! Definition substitution.
//!
//! Every nested node of every clone takes the next unused clone of the
//! design it instantiates. Pools are consumed first in, first out, in design
//! order then node order, so the assignment is deterministic.

use std::collections::VecDeque;

use desyde_model::design::{Design, DesignId, LeafKind};
use desyde_model::graph::node::Definition;

use crate::error::FlattenError;
use crate::registry::CloneRegistry;

/// Rewire nested nodes of the cloned designs to concrete clones.
///
/// `designs` are the clones produced for one category, whose nested nodes
/// still name original designs. Returns the number of nodes rewired.
pub fn substitute<L: LeafKind>(
    designs: &mut [Design<L>],
    originals: &[Design<L>],
    registry: &CloneRegistry,
) -> Result<usize, FlattenError> {
    let mut pools: Vec<VecDeque<DesignId>> = (0..originals.len())
        .map(|i| {
            registry
                .clones_of(DesignId(i))
                .iter()
                .map(|r| r.clone)
                .collect()
        })
        .collect();

    let mut substituted = 0;
    for design in designs.iter_mut() {
        let mut imported = Vec::new();
        for node in design.graph.nodes_mut() {
            let Definition::Nested(original) = node.definition else {
                continue;
            };
            let next = pools
                .get_mut(original.0)
                .and_then(VecDeque::pop_front)
                .ok_or_else(|| FlattenError::ClonePoolExhausted {
                    category: L::CATEGORY,
                    design: originals
                        .get(original.0)
                        .map(|d| d.identifier.clone())
                        .unwrap_or_else(|| original.to_string()),
                })?;
            node.definition = Definition::Nested(next);
            imported.push(next);
            substituted += 1;
        }
        design.imported.extend(imported);
    }

    Ok(substituted)
}
