use std::path::{Path, PathBuf};

use crate::error::HookError;
use crate::types::settings::Settings;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_root: PathBuf,
    pub hooks_dir: PathBuf,
    pub settings: Settings,
}

impl ProjectConfig {
    /// Directory holding the packaged hook scripts.
    pub fn package_hooks_dir(&self) -> PathBuf {
        self.project_root.join(&self.settings.package_dir).join("hooks")
    }
}

/// Walk up from `start_dir` to the first directory containing `.git`.
pub fn discover_project_root(start_dir: &Path) -> Result<PathBuf, HookError> {
    let mut current = start_dir.canonicalize()?;

    loop {
        if current.join(".git").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => break,
        }
    }

    Err(HookError::ProjectNotFound(start_dir.to_path_buf()))
}

/// Load settings for the project rooted at `project_root`.
///
/// Settings live under `extra.hookgate` in `composer.json`. A project without a
/// `composer.json`, or without that key, gets the defaults.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, HookError> {
    let project_root = project_root.canonicalize()?;

    let composer_json = project_root.join("composer.json");
    let settings = if composer_json.is_file() {
        let content = std::fs::read_to_string(&composer_json)?;
        let document: serde_json::Value = serde_json::from_str(&content)?;
        match document.get("extra").and_then(|extra| extra.get("hookgate")) {
            Some(section) => serde_json::from_value(section.clone())?,
            None => Settings::default(),
        }
    } else {
        Settings::default()
    };

    let hooks_dir = project_root.join(".git").join("hooks");

    Ok(ProjectConfig {
        project_root,
        hooks_dir,
        settings,
    })
}
