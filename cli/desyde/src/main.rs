//! DeSyDe CLI: flatten and inspect hierarchical system-design models.

mod commands;
mod manifest;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use desyde_flatten::PortPolicy;

use manifest::DesydeManifest;

#[derive(Parser)]
#[command(name = "desyde", version, about = "DeSyDe model elaboration")]
struct Cli {
    /// Log filter (e.g. `debug`, `desyde_flatten=trace`); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new DeSyDe project
    Init {
        /// Project name
        name: String,
    },
    /// Flatten a hierarchical model into a flat one
    Flatten {
        /// Input model file (default: model/main.json)
        #[arg(long)]
        input: Option<String>,
        /// Output model file (default: out/flat.json)
        #[arg(long)]
        output: Option<String>,
        /// Handling of unmatched hierarchical ports (strict, lenient)
        #[arg(long)]
        port_policy: Option<PortPolicy>,
        /// Print the full flatten report
        #[arg(long)]
        report: bool,
    },
    /// Show designs, nesting and multiplicities of a model
    Inspect {
        /// Input model file (default: model/main.json)
        #[arg(long)]
        input: Option<String>,
        /// Also list every element of the model
        #[arg(long)]
        elements: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (manifest, project_dir) = load_manifest_optional(&cwd)?;

    telemetry::init_tracing(
        cli.log_level.as_deref(),
        manifest.as_ref().and_then(|m| m.log_level()),
    )?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Flatten {
            input,
            output,
            port_policy,
            report,
        } => {
            let project_dir = project_dir.unwrap_or(cwd);
            commands::flatten::run(
                &project_dir,
                manifest.as_ref(),
                input.as_deref(),
                output.as_deref(),
                port_policy,
                report,
            )
        }

        Commands::Inspect { input, elements } => {
            let project_dir = project_dir.unwrap_or(cwd);
            commands::inspect::run(&project_dir, manifest.as_ref(), input.as_deref(), elements)
        }
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<DesydeManifest>, Option<PathBuf>)> {
    match DesydeManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
