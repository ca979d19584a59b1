//! Flattening errors.

use desyde_model::element::{DesignCategory, ElementRef};
use desyde_model::error::ModelError;
use desyde_model::graph::node::NodeId;
use thiserror::Error;

/// Errors that can occur while flattening a model.
///
/// Semantic errors describe a model that cannot be flattened. Internal
/// errors ([`FlattenError::is_internal`]) signal a broken engine invariant.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("cyclic {category} definition: {}", cycle.join(" -> "))]
    CyclicDefinition {
        category: DesignCategory,
        cycle: Vec<String>,
    },

    #[error(
        "{category} `{design}` is instantiated {clones} times but binding `{binding}` refers to it"
    )]
    AmbiguousBinding {
        category: DesignCategory,
        design: String,
        clones: usize,
        binding: String,
    },

    #[error("edge `{edge}` of `{design}` uses port {port} which `{target}` does not export")]
    DanglingPort {
        design: String,
        edge: String,
        port: NodeId,
        target: String,
    },

    #[error("reference {0} does not resolve to any element")]
    UnresolvedReference(ElementRef),

    #[error("{category} `{design}` needs more instances than can be counted")]
    MultiplicityOverflow {
        category: DesignCategory,
        design: String,
    },

    #[error("clone pool of {category} `{design}` exhausted")]
    ClonePoolExhausted {
        category: DesignCategory,
        design: String,
    },

    #[error("{category} multiplicities did not converge after {rounds} rounds")]
    NonConvergentMultiplicity {
        category: DesignCategory,
        rounds: usize,
    },

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl FlattenError {
    /// Whether this error reports a broken engine invariant rather than a
    /// problem with the input model.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            FlattenError::ClonePoolExhausted { .. } | FlattenError::NonConvergentMultiplicity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display() {
        let err = FlattenError::CyclicDefinition {
            category: DesignCategory::Platform,
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic platform definition: a -> b -> a");
        assert!(!err.is_internal());
    }

    #[test]
    fn overflow_display() {
        let err = FlattenError::MultiplicityOverflow {
            category: DesignCategory::Platform,
            design: "tile".into(),
        };
        assert_eq!(
            err.to_string(),
            "platform `tile` needs more instances than can be counted"
        );
        assert!(!err.is_internal());
    }

    #[test]
    fn internal_errors() {
        let err = FlattenError::ClonePoolExhausted {
            category: DesignCategory::Application,
            design: "filter".into(),
        };
        assert!(err.is_internal());
        let err = FlattenError::NonConvergentMultiplicity {
            category: DesignCategory::Application,
            rounds: 4,
        };
        assert!(err.is_internal());
        assert_eq!(
            err.to_string(),
            "application multiplicities did not converge after 4 rounds"
        );
    }

    #[test]
    fn ambiguous_binding_display() {
        let err = FlattenError::AmbiguousBinding {
            category: DesignCategory::Platform,
            design: "tile".into(),
            clones: 3,
            binding: "map_p0".into(),
        };
        assert_eq!(
            err.to_string(),
            "platform `tile` is instantiated 3 times but binding `map_p0` refers to it"
        );
    }
}
