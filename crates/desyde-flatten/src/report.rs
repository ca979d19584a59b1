//! Flatten report aggregating all stages.

use std::fmt;

use desyde_model::hash::{hash_hex, ContentHash};

use crate::reconnect::{PortPolicy, PortRepairs};

/// Statistics for one design category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindReport {
    /// Multiplicity of every source design, in source order.
    pub multiplicities: Vec<(String, usize)>,
    /// Designs in the flattened model.
    pub clones: usize,
    /// Nested nodes rewired to a concrete clone.
    pub substitutions: usize,
    pub ports: PortRepairs,
}

impl KindReport {
    /// Source designs instantiated more than once.
    pub fn replicated(&self) -> impl Iterator<Item = &(String, usize)> {
        self.multiplicities.iter().filter(|(_, count)| *count > 1)
    }
}

/// Summary of one flattening run.
#[derive(Debug, Clone)]
pub struct FlattenReport {
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    pub port_policy: PortPolicy,
    pub platforms: KindReport,
    pub applications: KindReport,
    pub extras_rows_before: usize,
    pub extras_rows_after: usize,
    /// Binding references rewritten onto flattened elements.
    pub bindings_rebound: usize,
    pub source_digest: ContentHash,
    pub flattened_digest: ContentHash,
}

fn write_kind(f: &mut fmt::Formatter<'_>, title: &str, kind: &KindReport) -> fmt::Result {
    writeln!(f, "--- {title} ---")?;
    writeln!(
        f,
        "  Designs: {} -> {}",
        kind.multiplicities.len(),
        kind.clones
    )?;
    for (name, count) in kind.replicated() {
        writeln!(f, "  {name}: x{count}")?;
    }
    writeln!(f, "  Substitutions: {}", kind.substitutions)?;
    writeln!(
        f,
        "  Ports: {} repaired, {} skipped",
        kind.ports.repaired, kind.ports.skipped
    )
}

impl fmt::Display for FlattenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Flatten Report ===")?;
        writeln!(f, "Duration: {} ms", self.duration_ms)?;
        writeln!(f, "Port policy: {}", self.port_policy)?;
        writeln!(f)?;

        write_kind(f, "Platforms", &self.platforms)?;
        writeln!(f)?;
        write_kind(f, "Applications", &self.applications)?;

        writeln!(f)?;
        writeln!(f, "--- Extras ---")?;
        writeln!(
            f,
            "  Rows: {} -> {}",
            self.extras_rows_before, self.extras_rows_after
        )?;

        writeln!(f)?;
        writeln!(f, "--- Refinement ---")?;
        writeln!(f, "  References rebound: {}", self.bindings_rebound)?;

        writeln!(f)?;
        writeln!(f, "Source digest:    {}", hash_hex(&self.source_digest))?;
        writeln!(f, "Flattened digest: {}", hash_hex(&self.flattened_digest))?;
        Ok(())
    }
}
