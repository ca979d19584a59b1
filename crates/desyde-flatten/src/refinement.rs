//! Refinement rebinding.
//!
//! The bindings graph is copied structurally and every element it names is
//! replaced by its single flattened counterpart.

use desyde_model::element::ElementRef;
use desyde_model::refinement::Refinement;

use crate::error::FlattenError;
use crate::registry::Registries;

/// Copy the refinement of the source model onto the flattened designs.
///
/// Returns the rebound refinement and the number of references rewritten.
pub fn rebind(
    source: &Refinement,
    registries: &Registries,
) -> Result<(Refinement, usize), FlattenError> {
    let mut refinement = source.clone();
    let mut rebound = 0;

    for node in &mut refinement.bindings.nodes {
        node.definition = counterpart(registries, &node.definition, &node.identifier)?;
        rebound += 1;
    }
    for edge in &mut refinement.bindings.edges {
        let identifier = edge.identifier.clone();
        for reference in edge.references_mut() {
            *reference = counterpart(registries, reference, &identifier)?;
            rebound += 1;
        }
    }

    Ok((refinement, rebound))
}

fn counterpart(
    registries: &Registries,
    element: &ElementRef,
    binding: &str,
) -> Result<ElementRef, FlattenError> {
    match registries.counterparts(element)?.as_slice() {
        [single] => Ok(*single),
        [] => Err(FlattenError::UnresolvedReference(*element)),
        many => Err(FlattenError::AmbiguousBinding {
            category: element.scope().category,
            design: element.scope().to_string(),
            clones: many.len(),
            binding: binding.to_string(),
        }),
    }
}
