//! Error types for model construction and handle resolution.

use crate::element::ElementRef;
use crate::graph::edge::EdgeId;
use crate::graph::node::NodeId;

/// Errors that can occur while building a model or resolving its handles.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("duplicate node identifier `{identifier}` in graph `{graph}`")]
    DuplicateNode { graph: String, identifier: String },

    #[error("duplicate edge identifier `{identifier}` in graph `{graph}`")]
    DuplicateEdge { graph: String, identifier: String },

    #[error("dangling edge `{identifier}`: endpoint {src} or {dst} not in graph `{graph}`")]
    DanglingEdge {
        graph: String,
        identifier: String,
        src: NodeId,
        dst: NodeId,
    },

    #[error("node {node} is not part of graph `{graph}`")]
    NodeNotFound { graph: String, node: NodeId },

    #[error("edge {edge} is not part of graph `{graph}`")]
    EdgeNotFound { graph: String, edge: EdgeId },

    #[error("reference {0} does not name an element of the model")]
    DanglingReference(ElementRef),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignId;
    use crate::element::Scope;

    #[test]
    fn error_display() {
        let err = ModelError::DuplicateNode {
            graph: "g".into(),
            identifier: "n0".into(),
        };
        assert_eq!(err.to_string(), "duplicate node identifier `n0` in graph `g`");

        let err = ModelError::DanglingReference(ElementRef::design(Scope::platform(DesignId(3))));
        assert_eq!(
            err.to_string(),
            "reference platform #3 does not name an element of the model"
        );
    }
}
