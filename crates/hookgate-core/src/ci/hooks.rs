//! Entry point for an installed `pre-commit` or `pre-push` hook.
//!
//! Reads git's hook input, works out which files the commit or push touches,
//! and runs the hook's pipeline over them.

use std::io::BufRead;

use crate::changes::{
    collect_changed_files, collect_staged_files, read_hook_input, FileSet, HookInput, RefUpdate,
};
use crate::check::{CheckContext, CheckResult, Pipeline, PipelineObserver};
use crate::discovery::ProjectConfig;
use crate::error::HookError;
use crate::process::ProcessRunner;
use crate::types::hook::HookKind;

/// How a hook run ended, when it did not fail.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Branch deletion or missing local branch: nothing was checked.
    Bypassed,
    /// Every stage passed.
    Passed {
        files: FileSet,
        results: Vec<CheckResult>,
    },
}

/// Work out the files a hook run covers.
///
/// Ref updates are diffed with `git diff-tree`. A `pre-commit` hook receives no
/// updates from git, so its files come from the index instead.
pub fn gather_files(
    hook: HookKind,
    updates: &[RefUpdate],
    project: &ProjectConfig,
    runner: &dyn ProcessRunner,
) -> Result<FileSet, HookError> {
    if updates.is_empty() && hook == HookKind::PreCommit {
        return collect_staged_files(runner, &project.project_root, &project.settings);
    }

    collect_changed_files(updates, runner, &project.project_root, &project.settings)
}

/// Run `hook` against the input in `reader`.
///
/// The whole input is read and validated before any process is started.
///
/// # Errors
///
/// Returns `HookError::InputFormat` for malformed input, or the error of the
/// first failing stage.
pub fn run_hook<R: BufRead>(
    hook: HookKind,
    reader: R,
    project: &ProjectConfig,
    runner: &dyn ProcessRunner,
    observer: &mut dyn PipelineObserver,
) -> Result<RunOutcome, HookError> {
    let updates = match read_hook_input(reader)? {
        HookInput::Bypass => return Ok(RunOutcome::Bypassed),
        HookInput::Updates(updates) => updates,
    };

    let files = gather_files(hook, &updates, project, runner)?;
    observer.files_collected(&files);

    let ctx = CheckContext {
        runner,
        project_root: &project.project_root,
        settings: &project.settings,
    };
    let results = Pipeline::for_hook(hook, &project.settings).run(&files, &ctx, observer)?;

    Ok(RunOutcome::Passed { files, results })
}
