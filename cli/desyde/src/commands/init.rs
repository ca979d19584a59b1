//! `desyde init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use desyde_model::model::Model;

use crate::commands::write_model;
use crate::manifest::{DesydeManifest, DEFAULT_INPUT, MANIFEST_FILE};

/// Create a new project in the directory `name`, relative to the working
/// directory.
pub fn run(name: &str) -> Result<()> {
    create_project(Path::new(name), name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("out")).context("creating out/ directory")?;

    fs::write(project_dir.join(MANIFEST_FILE), DesydeManifest::template(name))
        .with_context(|| format!("writing {MANIFEST_FILE}"))?;

    write_model(&project_dir.join(DEFAULT_INPUT), &Model::new())?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    tracing::debug!(project = name, dir = %project_dir.display(), "project created");

    println!("Created project '{name}'");
    println!("  {name}/{MANIFEST_FILE}");
    println!("  {name}/{DEFAULT_INPUT}");
    println!("  {name}/out/");
    println!("  {name}/.gitignore");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load_model;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("soc");

        create_project(&project, "soc").unwrap();

        assert!(project.join(MANIFEST_FILE).is_file());
        assert!(project.join(DEFAULT_INPUT).is_file());
        assert!(project.join("out").is_dir());
        assert!(project.join(".gitignore").is_file());
    }

    #[test]
    fn init_generates_loadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("soc");
        create_project(&project, "soc").unwrap();

        let content = fs::read_to_string(project.join(MANIFEST_FILE)).unwrap();
        let manifest = DesydeManifest::from_str(&content).unwrap();
        assert_eq!(manifest.project.name, "soc");

        let model = load_model(&project.join(DEFAULT_INPUT)).unwrap();
        assert!(model.applications.is_empty());
        assert!(model.platforms.is_empty());
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("existing");
        fs::create_dir(&project).unwrap();

        let err = create_project(&project, "existing").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
