//! Hierarchy flattening for DeSyDe system-design models.
//!
//! Elaborates a model whose application and platform designs instantiate
//! each other into a flat model in which every instantiation has its own
//! independent, identifier-suffixed copy. The pipeline runs per design
//! category (platforms first, then applications):
//!
//! 1. [`multiplicity`]: how many instances each design needs
//! 2. [`clone`]: one suffixed copy per instance, recorded in the [`registry`]
//! 3. [`substitute`]: nested nodes take concrete clones, first in first out
//! 4. [`reconnect`]: exported-port references follow their clone
//!
//! and then over the whole model: the [`binding`] ambiguity check, [`extras`]
//! cross-product expansion and [`refinement`] rebinding. [`Flattener`] runs
//! the pipeline once per source model and caches the result.

pub mod binding;
pub mod clone;
pub mod engine;
pub mod error;
pub mod extras;
pub mod multiplicity;
pub mod reconnect;
pub mod refinement;
pub mod registry;
pub mod report;
pub mod substitute;

/// Target of every tracing event emitted by this crate.
pub const TRACING_TARGET: &str = "desyde_flatten";

pub use binding::check_bindings;
pub use clone::{clone_all, clone_design};
pub use engine::{flatten, FlattenConfig, Flattened, Flattener};
pub use error::FlattenError;
pub use extras::{cross_product, expand_extras};
pub use multiplicity::{check_acyclic, resolve, Multiplicities};
pub use reconnect::{reconnect, PortPolicy, PortRepairs};
pub use refinement::rebind;
pub use registry::{CloneRecord, CloneRegistry, Registries};
pub use report::{FlattenReport, KindReport};
pub use substitute::substitute;
