//! CLI command implementations.

pub mod flatten;
pub mod init;
pub mod inspect;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use desyde_model::model::Model;

/// Resolve a file path: the command-line flag (relative to the working
/// directory), else the manifest setting or `fallback` (relative to the
/// project directory).
pub(crate) fn resolve_path(
    project_dir: &Path,
    flag: Option<&str>,
    configured: Option<&str>,
    fallback: &str,
) -> PathBuf {
    match flag {
        Some(path) => Path::new(path).to_path_buf(),
        None => project_dir.join(configured.unwrap_or(fallback)),
    }
}

/// Read a JSON model file.
pub(crate) fn load_model(path: &Path) -> Result<Model> {
    if !path.exists() {
        bail!(
            "model file not found: {}. Run 'desyde init' to create a project.",
            path.display()
        );
    }
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Write a model as pretty-printed JSON, creating parent directories.
pub(crate) fn write_model(path: &Path, model: &Model) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(model).context("serializing model")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_is_relative_to_cwd() {
        let path = resolve_path(Path::new("/proj"), Some("other.json"), Some("m.json"), "x.json");
        assert_eq!(path, PathBuf::from("other.json"));
        let path = resolve_path(Path::new("/proj"), None, Some("m.json"), "x.json");
        assert_eq!(path, PathBuf::from("/proj/m.json"));
        let path = resolve_path(Path::new("/proj"), None, None, "x.json");
        assert_eq!(path, PathBuf::from("/proj/x.json"));
    }

    #[test]
    fn model_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        write_model(&path, &Model::new()).unwrap();
        assert_eq!(load_model(&path).unwrap(), Model::new());
    }

    #[test]
    fn hierarchical_model_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soc.json");
        let model = crate::commands::flatten::tests::soc_model();
        write_model(&path, &model).unwrap();

        let back = load_model(&path).unwrap();
        assert_eq!(back.platforms[0].leaves.len(), 2);
        assert_eq!(back, model);
    }

    #[test]
    fn missing_model_mentions_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("desyde init"));
    }
}
