//! Handler for `hookgate run pre-commit` / `hookgate run pre-push`.

use std::io;

use hookgate_core::ci::{run_hook, RunOutcome};
use hookgate_core::discovery::load_project_config;
use hookgate_core::process::SystemRunner;
use hookgate_core::HookKind;

use crate::cli::RunHook;
use crate::output::Reporter;

impl From<RunHook> for HookKind {
    fn from(hook: RunHook) -> Self {
        match hook {
            RunHook::PreCommit => HookKind::PreCommit,
            RunHook::PrePush => HookKind::PrePush,
        }
    }
}

/// Run a hook's pipeline over the files named by git's hook input on stdin.
///
/// Returns `true` when every stage passed or the push deletes a branch.
pub fn run_hook_command(hook: RunHook, root_override: Option<&str>, reporter: &mut Reporter) -> bool {
    let hook = HookKind::from(hook);

    let Some(root) = super::resolve_root(root_override, reporter) else {
        return false;
    };
    let project = match load_project_config(&root) {
        Ok(p) => p,
        Err(e) => {
            reporter.error(&format!("Failed to load project settings: {e}"));
            return false;
        }
    };

    reporter.section("Fetching files");

    let stdin = io::stdin();
    match run_hook(hook, stdin.lock(), &project, &SystemRunner, reporter) {
        Ok(RunOutcome::Bypassed) => true,
        Ok(RunOutcome::Passed { results, .. }) => {
            reporter.success(&format!("{hook}: {} check(s) passed", results.len()));
            true
        }
        Err(e) => {
            reporter.error(&format!("{e}"));
            if hook == HookKind::PrePush {
                reporter.error("Push rejected. Use 'git push --no-verify' to skip.");
            }
            false
        }
    }
}
