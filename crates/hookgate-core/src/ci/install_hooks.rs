//! Installing and removing the packaged git hook scripts.
//!
//! Composer runs `hookgate hooks pre` before installing or updating dependencies
//! and `hookgate hooks post` afterwards. The pre step removes the hooks this tool
//! manages; the post step copies fresh scripts from the package into
//! `.git/hooks/` and makes them executable.
//!
//! A hook that cannot be copied or removed is reported, never fatal: a missing
//! convenience hook must not break a dependency install.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::ProjectConfig;
use crate::types::hook::HookKind;

/// Permission bits of an installed hook script.
pub const HOOK_SCRIPT_MODE: u32 = 0o777;

/// A managed hook: where its script is packaged and where git expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    pub name: String,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

/// The fixed set of hooks for `project`.
pub fn hook_specs(project: &ProjectConfig) -> Vec<HookSpec> {
    let package_hooks = project.package_hooks_dir();
    HookKind::ALL
        .iter()
        .map(|hook| HookSpec {
            name: hook.name().to_string(),
            source_path: package_hooks.join(format!("{}.sh", hook.name())),
            target_path: project.hooks_dir.join(hook.name()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    Installed,
    Removed,
}

/// What happened to one hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookNotice {
    pub hook: String,
    pub action: HookAction,
    /// `None` on success, otherwise why the action failed.
    pub error: Option<String>,
}

impl HookNotice {
    fn ok(hook: &str, action: HookAction) -> Self {
        Self {
            hook: hook.to_string(),
            action,
            error: None,
        }
    }

    fn failed(hook: &str, action: HookAction, error: impl ToString) -> Self {
        Self {
            hook: hook.to_string(),
            action,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Human-readable line for this notice.
    pub fn message(&self) -> String {
        match (&self.action, &self.error) {
            (HookAction::Installed, None) => format!("git hook \"{}\" installed", self.hook),
            (HookAction::Removed, None) => format!("git hook \"{}\" removed", self.hook),
            (HookAction::Installed, Some(e)) => {
                format!("git hook \"{}\" could not be installed: {e}", self.hook)
            }
            (HookAction::Removed, Some(e)) => {
                format!("git hook \"{}\" could not be removed: {e}", self.hook)
            }
        }
    }
}

/// Result of an install or removal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// `false` when the repository has no hooks directory and nothing was done.
    pub hooks_dir_present: bool,
    pub notices: Vec<HookNotice>,
}

impl InstallReport {
    fn skipped() -> Self {
        Self::default()
    }

    pub fn failure_count(&self) -> usize {
        self.notices.iter().filter(|n| !n.is_success()).count()
    }
}

/// Remove installed hooks ahead of a dependency install or update.
///
/// Hooks that are not installed are skipped silently.
pub fn remove_hooks(hooks_dir: &Path, specs: &[HookSpec]) -> InstallReport {
    // CI checkouts and some hosts have no hooks directory at all.
    if !hooks_dir.is_dir() {
        return InstallReport::skipped();
    }

    let notices = specs
        .iter()
        .filter(|spec| spec.target_path.exists())
        .map(|spec| match fs::remove_file(&spec.target_path) {
            Ok(()) => HookNotice::ok(&spec.name, HookAction::Removed),
            Err(e) => HookNotice::failed(&spec.name, HookAction::Removed, e),
        })
        .collect();

    InstallReport {
        hooks_dir_present: true,
        notices,
    }
}

/// Copy the packaged hook scripts into the hooks directory.
pub fn install_hooks(hooks_dir: &Path, specs: &[HookSpec]) -> InstallReport {
    if !hooks_dir.is_dir() {
        return InstallReport::skipped();
    }

    let notices = specs
        .iter()
        .map(|spec| match install_one(spec) {
            Ok(()) => HookNotice::ok(&spec.name, HookAction::Installed),
            Err(e) => HookNotice::failed(&spec.name, HookAction::Installed, e),
        })
        .collect();

    InstallReport {
        hooks_dir_present: true,
        notices,
    }
}

fn install_one(spec: &HookSpec) -> std::io::Result<()> {
    fs::copy(&spec.source_path, &spec.target_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&spec.target_path, fs::Permissions::from_mode(HOOK_SCRIPT_MODE))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::load_project_config;
    use tempfile::TempDir;

    /// A project with `.git/hooks` and the packaged scripts in place.
    fn setup_project(tmp: &TempDir) -> ProjectConfig {
        fs::create_dir_all(tmp.path().join(".git").join("hooks")).unwrap();
        let config = load_project_config(tmp.path()).unwrap();

        let package_hooks = config.package_hooks_dir();
        fs::create_dir_all(&package_hooks).unwrap();
        for hook in HookKind::ALL {
            fs::write(
                package_hooks.join(format!("{}.sh", hook.name())),
                format!("#!/bin/sh\nexec hookgate run {}\n", hook.name()),
            )
            .unwrap();
        }
        config
    }

    #[test]
    fn hook_specs_cover_both_hooks() {
        let tmp = TempDir::new().unwrap();
        let config = load_project_config(tmp.path()).unwrap();
        let specs = hook_specs(&config);

        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["pre-push", "pre-commit"]);
        assert!(specs[0]
            .source_path
            .ends_with("vendor/hookgate/hookgate/hooks/pre-push.sh"));
        assert!(specs[0].target_path.ends_with(".git/hooks/pre-push"));
    }

    #[test]
    fn install_copies_scripts_and_makes_them_executable() {
        let tmp = TempDir::new().unwrap();
        let config = setup_project(&tmp);

        let report = install_hooks(&config.hooks_dir, &hook_specs(&config));
        assert!(report.hooks_dir_present);
        assert_eq!(report.notices.len(), 2);
        assert_eq!(report.failure_count(), 0);
        assert_eq!(report.notices[0].message(), "git hook \"pre-push\" installed");

        let pre_push = config.hooks_dir.join("pre-push");
        let content = fs::read_to_string(&pre_push).unwrap();
        assert!(content.contains("hookgate run pre-push"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&pre_push).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "pre-push should be executable by everyone");
        }
    }

    #[test]
    fn install_overwrites_existing_hook() {
        let tmp = TempDir::new().unwrap();
        let config = setup_project(&tmp);
        fs::write(config.hooks_dir.join("pre-commit"), "#!/bin/sh\nold\n").unwrap();

        install_hooks(&config.hooks_dir, &hook_specs(&config));

        let content = fs::read_to_string(config.hooks_dir.join("pre-commit")).unwrap();
        assert!(content.contains("hookgate run pre-commit"));
    }

    #[test]
    fn install_failure_does_not_stop_other_hooks() {
        let tmp = TempDir::new().unwrap();
        let config = setup_project(&tmp);
        fs::remove_file(config.package_hooks_dir().join("pre-push.sh")).unwrap();

        let report = install_hooks(&config.hooks_dir, &hook_specs(&config));
        assert_eq!(report.failure_count(), 1);
        assert!(!report.notices[0].is_success());
        assert!(report.notices[0].message().contains("could not be installed"));
        assert!(report.notices[1].is_success());
        assert!(config.hooks_dir.join("pre-commit").exists());
    }

    #[test]
    fn missing_hooks_dir_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let config = load_project_config(tmp.path()).unwrap();
        let specs = hook_specs(&config);

        let report = install_hooks(&config.hooks_dir, &specs);
        assert!(!report.hooks_dir_present);
        assert!(report.notices.is_empty());

        let report = remove_hooks(&config.hooks_dir, &specs);
        assert!(!report.hooks_dir_present);
        assert!(!tmp.path().join(".git").exists());
    }

    #[test]
    fn remove_deletes_only_existing_hooks() {
        let tmp = TempDir::new().unwrap();
        let config = setup_project(&tmp);
        fs::write(config.hooks_dir.join("pre-push"), "#!/bin/sh\n").unwrap();

        let report = remove_hooks(&config.hooks_dir, &hook_specs(&config));
        assert!(report.hooks_dir_present);
        assert_eq!(report.notices.len(), 1);
        assert_eq!(report.notices[0].message(), "git hook \"pre-push\" removed");
        assert!(!config.hooks_dir.join("pre-push").exists());
    }

    #[test]
    fn remove_then_install_round_trip() {
        let tmp = TempDir::new().unwrap();
        let config = setup_project(&tmp);
        let specs = hook_specs(&config);

        install_hooks(&config.hooks_dir, &specs);
        let removed = remove_hooks(&config.hooks_dir, &specs);
        assert_eq!(removed.notices.len(), 2);
        assert!(specs.iter().all(|s| !s.target_path.exists()));
    }
}
