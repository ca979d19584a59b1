//! Multiplicity resolution.
//!
//! A design referenced `k` times by a design that itself needs `n` instances
//! contributes `k * n` instances:
//!
//! ```text
//! count[p] = sum over pp != p of count[pp] * refs(pp, p)
//! ```
//!
//! falling back to 1 for designs nobody references (top-level designs).
//! The nesting relation is checked for cycles first; the equation is then
//! iterated from all-ones until it stops changing, which for an acyclic
//! relation happens within `|designs| + 1` rounds.

use std::collections::BTreeMap;

use desyde_model::design::{Design, DesignId, LeafKind};
use desyde_model::element::ElementRef;
use desyde_model::graph::node::NodeId;

use crate::error::FlattenError;
use crate::TRACING_TARGET;

/// Number of instances each design of one category needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplicities {
    counts: Vec<usize>,
}

impl Multiplicities {
    /// Instances needed for a design, 0 for an unknown handle.
    pub fn get(&self, design: DesignId) -> usize {
        self.counts.get(design.0).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DesignId, usize)> + '_ {
        self.counts.iter().enumerate().map(|(i, c)| (DesignId(i), *c))
    }

    /// Total number of clones the counts call for. [`resolve`] guarantees
    /// the sum fits in a `usize`.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Check that no design instantiates itself, directly or transitively.
///
/// Also rejects nested references to designs that do not exist.
pub fn check_acyclic<L: LeafKind>(designs: &[Design<L>]) -> Result<(), FlattenError> {
    let children: Vec<Vec<(NodeId, DesignId)>> = designs
        .iter()
        .map(|design| {
            design
                .graph
                .nodes()
                .filter_map(|(id, node)| node.definition.nested().map(|nested| (id, nested)))
                .collect()
        })
        .collect();

    let mut marks = vec![Mark::Unvisited; designs.len()];
    // (design, next child to visit); the designs on the stack form the current path
    let mut stack: Vec<(DesignId, usize)> = Vec::new();
    for root in 0..designs.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::Active;
        stack.push((DesignId(root), 0));

        while let Some(top) = stack.last_mut() {
            let (id, next) = *top;
            let Some(&(node_id, nested)) = children[id.0].get(next) else {
                marks[id.0] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;

            if nested.0 >= designs.len() {
                return Err(FlattenError::UnresolvedReference(ElementRef::node(
                    L::scope(id),
                    node_id,
                )));
            }
            match marks[nested.0] {
                Mark::Done => {}
                Mark::Active => {
                    let start = stack.iter().position(|(d, _)| *d == nested).unwrap_or(0);
                    let cycle = stack[start..]
                        .iter()
                        .map(|(d, _)| *d)
                        .chain(std::iter::once(nested))
                        .map(|d| designs[d.0].identifier.clone())
                        .collect();
                    return Err(FlattenError::CyclicDefinition {
                        category: L::CATEGORY,
                        cycle,
                    });
                }
                Mark::Unvisited => {
                    marks[nested.0] = Mark::Active;
                    stack.push((nested, 0));
                }
            }
        }
    }
    Ok(())
}

/// Compute how many instances every design of one category needs.
pub fn resolve<L: LeafKind>(designs: &[Design<L>]) -> Result<Multiplicities, FlattenError> {
    check_acyclic(designs)?;

    // refs[pp] = (p, number of nodes of pp instantiating p)
    let refs: Vec<BTreeMap<DesignId, usize>> = designs
        .iter()
        .map(|design| {
            let mut counts = BTreeMap::new();
            for nested in design.nested_definitions() {
                *counts.entry(nested).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let limit = designs.len() + 1;
    let mut counts = vec![1usize; designs.len()];
    for _ in 0..limit {
        let mut next = vec![0usize; designs.len()];
        for (pp, nested) in refs.iter().enumerate() {
            for (p, k) in nested {
                if p.0 != pp {
                    let sum = next[p.0];
                    next[p.0] = counts[pp]
                        .checked_mul(*k)
                        .and_then(|n| sum.checked_add(n))
                        .ok_or_else(|| overflow(designs, *p))?;
                }
            }
        }
        for count in next.iter_mut().filter(|c| **c == 0) {
            *count = 1;
        }
        if next == counts {
            counts.iter().enumerate().try_fold(0usize, |total, (i, c)| {
                total
                    .checked_add(*c)
                    .ok_or_else(|| overflow(designs, DesignId(i)))
            })?;
            for (design, count) in designs.iter().zip(&counts) {
                tracing::trace!(
                    target: TRACING_TARGET,
                    category = %L::CATEGORY,
                    design = %design.identifier,
                    count,
                    "resolved multiplicity"
                );
            }
            return Ok(Multiplicities { counts });
        }
        counts = next;
    }

    Err(FlattenError::NonConvergentMultiplicity {
        category: L::CATEGORY,
        rounds: limit,
    })
}

fn overflow<L: LeafKind>(designs: &[Design<L>], design: DesignId) -> FlattenError {
    FlattenError::MultiplicityOverflow {
        category: L::CATEGORY,
        design: designs[design.0].identifier.clone(),
    }
}
