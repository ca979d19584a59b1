//! Hierarchical port reconnection.
//!
//! An edge may attach to an exported node of the design instantiated at one
//! of its ends. After substitution that end instantiates a concrete clone,
//! so the port is rebound to the clone's copy of the exported node using
//! the port map recorded by the cloner.

use std::fmt;
use std::str::FromStr;

use desyde_model::design::{Design, LeafKind};
use desyde_model::graph::edge::{EdgeId, Endpoint};
use desyde_model::graph::node::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::FlattenError;
use crate::registry::CloneRegistry;
use crate::TRACING_TARGET;

/// What to do with a port that cannot be matched to an exported node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortPolicy {
    /// Fail the flattening.
    #[default]
    Strict,
    /// Log a warning and leave the port as it was.
    Lenient,
}

impl fmt::Display for PortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortPolicy::Strict => write!(f, "strict"),
            PortPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for PortPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(PortPolicy::Strict),
            "lenient" => Ok(PortPolicy::Lenient),
            other => Err(format!(
                "unknown port policy `{other}` (expected `strict` or `lenient`)"
            )),
        }
    }
}

/// Port reconnection counters for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortRepairs {
    pub repaired: usize,
    pub skipped: usize,
}

/// Rebind every exported-port reference of the substituted designs.
pub fn reconnect<L: LeafKind>(
    designs: &mut [Design<L>],
    registry: &CloneRegistry,
    policy: PortPolicy,
) -> Result<PortRepairs, FlattenError> {
    let mut repairs = PortRepairs::default();
    let mut updates: Vec<(usize, EdgeId, Endpoint, NodeId)> = Vec::new();

    for (d, design) in designs.iter().enumerate() {
        for (edge_id, edge) in design.graph.edges() {
            for end in [Endpoint::From, Endpoint::To] {
                let Some(port) = edge.exported(end) else {
                    continue;
                };
                let node = design.graph.require_node(edge.node(end))?;
                // leaf endpoints have no ports to rebind
                let Some(clone) = node.definition.nested() else {
                    continue;
                };
                let resolved = registry
                    .record_for(clone)
                    .and_then(|record| record.port(port));

                if let Some(resolved) = resolved {
                    updates.push((d, edge_id, end, resolved));
                    continue;
                }

                let target = designs
                    .get(clone.0)
                    .map(|t| t.identifier.clone())
                    .unwrap_or_else(|| node.identifier.clone());
                match policy {
                    PortPolicy::Strict => {
                        return Err(FlattenError::DanglingPort {
                            design: design.identifier.clone(),
                            edge: edge.identifier.clone(),
                            port,
                            target,
                        });
                    }
                    PortPolicy::Lenient => {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            design = %design.identifier,
                            edge = %edge.identifier,
                            %end,
                            %port,
                            %target,
                            "leaving unmatched hierarchical port unrepaired"
                        );
                        repairs.skipped += 1;
                    }
                }
            }
        }
    }

    for (d, edge_id, end, port) in updates {
        if let Some(edge) = designs.get_mut(d).and_then(|g| g.graph.edge_mut(edge_id)) {
            *edge.exported_mut(end) = Some(port);
            repairs.repaired += 1;
        }
    }

    Ok(repairs)
}
