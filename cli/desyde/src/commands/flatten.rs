//! `desyde flatten`: load a model, flatten it, write the result.

use std::path::Path;

use anyhow::{Context, Result};
use desyde_flatten::{flatten, FlattenConfig, FlattenReport, PortPolicy};

use crate::commands::{load_model, resolve_path, write_model};
use crate::manifest::{DesydeManifest, DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Run the flatten command.
pub fn run(
    project_dir: &Path,
    manifest: Option<&DesydeManifest>,
    input: Option<&str>,
    output: Option<&str>,
    port_policy: Option<PortPolicy>,
    show_report: bool,
) -> Result<()> {
    let input = resolve_path(
        project_dir,
        input,
        manifest.and_then(|m| m.default_input()),
        DEFAULT_INPUT,
    );
    let output = resolve_path(
        project_dir,
        output,
        manifest.and_then(|m| m.default_output()),
        DEFAULT_OUTPUT,
    );
    let config = FlattenConfig {
        port_policy: port_policy
            .or_else(|| manifest.and_then(|m| m.port_policy()))
            .unwrap_or_default(),
    };

    let report = flatten_file(&input, &output, config)?;

    println!("Flattened {} -> {}", input.display(), output.display());
    println!(
        "  Platforms:    {} -> {}",
        report.platforms.multiplicities.len(),
        report.platforms.clones
    );
    println!(
        "  Applications: {} -> {}",
        report.applications.multiplicities.len(),
        report.applications.clones
    );
    println!(
        "  Extras rows:  {} -> {}",
        report.extras_rows_before, report.extras_rows_after
    );

    if show_report {
        println!();
        print!("{report}");
    }

    Ok(())
}

/// Flatten the model stored at `input` into `output`.
pub(crate) fn flatten_file(
    input: &Path,
    output: &Path,
    config: FlattenConfig,
) -> Result<FlattenReport> {
    let model = load_model(input)?;
    let flattened = flatten(&model, config)
        .with_context(|| format!("flattening {}", input.display()))?;
    write_model(output, &flattened.model)?;
    Ok(flattened.report)
}
