//! Handler for `hookgate hooks pre|post`, the composer lifecycle entry points.
//!
//! Wire them into `composer.json`:
//!
//! ```json
//! "scripts": {
//!     "pre-install-cmd": "hookgate hooks pre",
//!     "pre-update-cmd": "hookgate hooks pre",
//!     "post-install-cmd": "hookgate hooks post",
//!     "post-update-cmd": "hookgate hooks post"
//! }
//! ```

use std::path::PathBuf;

use hookgate_core::ci::{hook_specs, install_hooks, remove_hooks};
use hookgate_core::discovery::{discover_project_root, load_project_config};

use crate::cli::HooksAction;
use crate::output::Reporter;

/// Install or remove the managed hooks.
///
/// Never fails the surrounding composer run because of a single hook; only a
/// project whose settings cannot be read is an error.
pub fn run_hooks_command(
    action: HooksAction,
    root_override: Option<&str>,
    reporter: &mut Reporter,
) -> bool {
    // Outside a git checkout composer still runs these scripts; the missing
    // hooks directory turns them into no-ops.
    let root = match root_override {
        Some(root) => PathBuf::from(root),
        None => match std::env::current_dir() {
            Ok(cwd) => discover_project_root(&cwd).unwrap_or(cwd),
            Err(e) => {
                reporter.error(&format!("Cannot get current directory: {e}"));
                return false;
            }
        },
    };

    let project = match load_project_config(&root) {
        Ok(p) => p,
        Err(e) => {
            reporter.error(&format!("Failed to load project settings: {e}"));
            return false;
        }
    };

    let specs = hook_specs(&project);
    let report = match action {
        HooksAction::Pre => remove_hooks(&project.hooks_dir, &specs),
        HooksAction::Post => install_hooks(&project.hooks_dir, &specs),
    };
    reporter.report_install(&report);

    true
}
