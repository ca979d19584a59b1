//! `desyde inspect`: show a model's designs, nesting and multiplicities
//! without flattening it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use desyde_flatten::resolve;
use desyde_model::design::{ApplicationLeaf, LeafKind, PlatformLeaf};
use desyde_model::model::Model;

use crate::commands::{load_model, resolve_path};
use crate::manifest::{DesydeManifest, DEFAULT_INPUT};

/// Inspect a model file.
pub fn run(
    project_dir: &Path,
    manifest: Option<&DesydeManifest>,
    input: Option<&str>,
    elements: bool,
) -> Result<()> {
    let path = resolve_path(
        project_dir,
        input,
        manifest.and_then(|m| m.default_input()),
        DEFAULT_INPUT,
    );
    let model = load_model(&path)?;

    println!("=== Model ({}) ===", path.display());
    print!("{}", render(&model, elements)?);
    Ok(())
}

pub(crate) fn render(model: &Model, elements: bool) -> Result<String> {
    let mut out = String::new();
    render_designs::<PlatformLeaf>(model, "Platforms", &mut out)?;
    writeln!(out)?;
    render_designs::<ApplicationLeaf>(model, "Applications", &mut out)?;

    writeln!(out)?;
    writeln!(out, "--- Extras ({} tables) ---", model.extras.tables.len())?;
    for table in &model.extras.tables {
        writeln!(
            out,
            "  {}: {} rows, values [{}], references [{}]",
            table.identifier,
            table.entries.len(),
            table.value_names.join(", "),
            table.reference_names.join(", ")
        )?;
    }

    let bindings = &model.refinement.bindings;
    writeln!(out)?;
    writeln!(out, "--- Refinement ---")?;
    writeln!(out, "  Binding nodes: {}", bindings.nodes.len())?;
    writeln!(out, "  Binding edges: {}", bindings.edges.len())?;

    if elements {
        writeln!(out)?;
        writeln!(out, "--- Elements ---")?;
        for element in model.elements() {
            let name = model.require_identifier(&element)?;
            writeln!(out, "  {element}: {name}")?;
        }
    }

    Ok(out)
}

fn render_designs<L: LeafKind>(model: &Model, title: &str, out: &mut String) -> Result<()> {
    let designs = L::designs(model);
    let counts =
        resolve(designs).with_context(|| format!("resolving {} multiplicities", L::CATEGORY))?;

    writeln!(out, "--- {title} ({}) ---", designs.len())?;
    for (id, count) in counts.iter() {
        let Some(design) = designs.get(id.0) else {
            continue;
        };
        writeln!(
            out,
            "  {} x{count}: {} nodes, {} edges, {} leaves, {} exported",
            design.identifier,
            design.graph.node_count(),
            design.graph.edge_count(),
            design.leaves.len(),
            design.exported.len()
        )?;

        let mut nested = BTreeMap::new();
        for child in design.nested_definitions() {
            *nested.entry(child).or_insert(0usize) += 1;
        }
        if !nested.is_empty() {
            let list: Vec<String> = nested
                .iter()
                .map(|(child, n)| {
                    let name = designs
                        .get(child.0)
                        .map(|d| d.identifier.as_str())
                        .unwrap_or("?");
                    format!("{name} x{n}")
                })
                .collect();
            writeln!(out, "    nests: {}", list.join(", "))?;
        }
    }
    Ok(())
}
