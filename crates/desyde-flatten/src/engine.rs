//! Flattening engine orchestrator.

use std::time::Instant;

use desyde_model::design::{ApplicationLeaf, Design, LeafKind, PlatformLeaf};
use desyde_model::hash::content_hash;
use desyde_model::model::Model;

use crate::binding::check_bindings;
use crate::clone::clone_all;
use crate::error::FlattenError;
use crate::extras::expand_extras;
use crate::multiplicity::resolve;
use crate::reconnect::{reconnect, PortPolicy};
use crate::refinement::rebind;
use crate::registry::{CloneRegistry, Registries};
use crate::report::{FlattenReport, KindReport};
use crate::substitute::substitute;
use crate::TRACING_TARGET;

/// Configuration for a flattening run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Handling of hierarchical ports that match no exported node.
    pub port_policy: PortPolicy,
}

/// Output of a successful flattening run.
#[derive(Debug, Clone)]
pub struct Flattened {
    pub model: Model,
    pub report: FlattenReport,
}

/// Flattens one source model, at most once.
///
/// The source is borrowed read-only. The first successful
/// [`Flattener::flatten`] call computes and caches the result; later calls
/// return the cached model. A failed run caches nothing.
pub struct Flattener<'a> {
    source: &'a Model,
    config: FlattenConfig,
    cache: Option<Flattened>,
    runs: usize,
}

impl<'a> Flattener<'a> {
    pub fn new(source: &'a Model) -> Self {
        Self::with_config(source, FlattenConfig::default())
    }

    pub fn with_config(source: &'a Model, config: FlattenConfig) -> Self {
        Self {
            source,
            config,
            cache: None,
            runs: 0,
        }
    }

    pub fn source(&self) -> &'a Model {
        self.source
    }

    pub fn config(&self) -> FlattenConfig {
        self.config
    }

    /// Flatten the source model, or return the cached result.
    pub fn flatten(&mut self) -> Result<&Model, FlattenError> {
        let flattened = match self.cache.take() {
            Some(flattened) => flattened,
            None => self.run()?,
        };
        Ok(&self.cache.insert(flattened).model)
    }

    /// The flattened model, if [`Flattener::flatten`] has succeeded.
    pub fn flattened(&self) -> Option<&Model> {
        self.cache.as_ref().map(|f| &f.model)
    }

    /// The report of the cached run.
    pub fn report(&self) -> Option<&FlattenReport> {
        self.cache.as_ref().map(|f| &f.report)
    }

    /// Number of times the pipeline actually ran.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn into_flattened(self) -> Option<Flattened> {
        self.cache
    }

    fn run(&mut self) -> Result<Flattened, FlattenError> {
        self.runs += 1;
        run_pipeline(self.source, self.config)
    }
}

/// Flatten a model once, without caching.
pub fn flatten(source: &Model, config: FlattenConfig) -> Result<Flattened, FlattenError> {
    Flattener::with_config(source, config).run()
}

/// Run every stage:
/// platforms -> applications -> binding check -> extras -> refinement -> report.
fn run_pipeline(source: &Model, config: FlattenConfig) -> Result<Flattened, FlattenError> {
    let start = Instant::now();
    tracing::debug!(
        target: TRACING_TARGET,
        platforms = source.platforms.len(),
        applications = source.applications.len(),
        port_policy = %config.port_policy,
        "flattening model"
    );

    // Stage 1: Platforms
    let (platforms, platform_registry, platform_report) =
        flatten_kind::<PlatformLeaf>(source, config.port_policy)?;

    // Stage 2: Applications
    let (applications, application_registry, application_report) =
        flatten_kind::<ApplicationLeaf>(source, config.port_policy)?;

    let registries = Registries {
        platforms: platform_registry,
        applications: application_registry,
    };

    // Stage 3: Binding ambiguity
    tracing::debug!(target: TRACING_TARGET, stage = "bindings", "checking binding ambiguity");
    check_bindings(source, &registries)?;

    // Stage 4: Extras
    tracing::debug!(target: TRACING_TARGET, stage = "extras", "expanding extras tables");
    let extras = expand_extras(&source.extras, &registries)?;

    // Stage 5: Refinement
    tracing::debug!(target: TRACING_TARGET, stage = "refinement", "rebinding refinement");
    let (refinement, bindings_rebound) = rebind(&source.refinement, &registries)?;

    let model = Model {
        platforms,
        applications,
        extras,
        refinement,
    };

    let report = FlattenReport {
        duration_ms: start.elapsed().as_millis() as u64,
        port_policy: config.port_policy,
        platforms: platform_report,
        applications: application_report,
        extras_rows_before: source.extras.entry_count(),
        extras_rows_after: model.extras.entry_count(),
        bindings_rebound,
        source_digest: content_hash(source)?,
        flattened_digest: content_hash(&model)?,
    };

    tracing::info!(
        target: TRACING_TARGET,
        platforms = report.platforms.clones,
        applications = report.applications.clones,
        extras_rows = report.extras_rows_after,
        duration_ms = report.duration_ms,
        "model flattened"
    );

    Ok(Flattened { model, report })
}

/// Multiplicity, cloning, substitution and port reconnection for one category.
fn flatten_kind<L: LeafKind>(
    source: &Model,
    policy: PortPolicy,
) -> Result<(Vec<Design<L>>, CloneRegistry, KindReport), FlattenError> {
    let originals = L::designs(source);
    tracing::debug!(
        target: TRACING_TARGET,
        category = %L::CATEGORY,
        designs = originals.len(),
        "flattening designs"
    );

    let counts = resolve(originals)?;
    let (mut designs, registry) = clone_all(originals, &counts)?;
    let substitutions = substitute(&mut designs, originals, &registry)?;
    let ports = reconnect(&mut designs, &registry, policy)?;

    let report = KindReport {
        multiplicities: originals
            .iter()
            .zip(counts.iter())
            .map(|(design, (_, count))| (design.identifier.clone(), count))
            .collect(),
        clones: designs.len(),
        substitutions,
        ports,
    };

    tracing::debug!(
        target: TRACING_TARGET,
        category = %L::CATEGORY,
        clones = report.clones,
        substitutions,
        ports_repaired = ports.repaired,
        ports_skipped = ports.skipped,
        "designs flattened"
    );

    Ok((designs, registry, report))
}
