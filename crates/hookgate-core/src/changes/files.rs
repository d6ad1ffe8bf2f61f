use std::collections::BTreeSet;
use std::path::Path;

use crate::error::HookError;
use crate::process::{CommandSpec, ProcessRunner};
use crate::types::settings::Settings;

use super::refs::RefUpdate;

/// Repository-relative paths touched by a push or commit.
///
/// Deduplicated and ordered. After [`FileSet::retain_existing`] every entry
/// exists in the working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet(BTreeSet<String>);

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every path of NUL-separated (`git -z`) output.
    ///
    /// Paths come back verbatim, without git's C-style quoting of non-ASCII or
    /// special bytes.
    pub fn extend_from_output(&mut self, output: &str) {
        self.0.extend(
            output
                .split('\0')
                .filter(|path| !path.is_empty())
                .map(str::to_string),
        );
    }

    /// Drop paths that no longer exist under `root`.
    pub fn retain_existing(&mut self, root: &Path) {
        self.0.retain(|path| root.join(path).exists());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .filter(|path: &String| !path.is_empty())
                .collect(),
        )
    }
}

/// `git diff-tree --no-commit-id --name-only -r -z <local> <remote>`.
pub fn diff_tree_command(settings: &Settings, root: &Path, update: &RefUpdate) -> CommandSpec {
    CommandSpec::new(&settings.git_binary)
        .args(["diff-tree", "--no-commit-id", "--name-only", "-r", "-z"])
        .arg(update.local_sha.as_str())
        .arg(update.remote_sha.as_str())
        .current_dir(root)
}

/// Collect the files changed across every ref range of a push.
///
/// Only git's stdout is used; a range git cannot diff contributes nothing.
///
/// # Errors
///
/// Returns `HookError::Spawn` if git cannot be started.
pub fn collect_changed_files(
    updates: &[RefUpdate],
    runner: &dyn ProcessRunner,
    root: &Path,
    settings: &Settings,
) -> Result<FileSet, HookError> {
    let mut files = FileSet::new();

    for update in updates {
        let output = runner.run(&diff_tree_command(settings, root, update))?;
        files.extend_from_output(&output.stdout);
    }

    files.retain_existing(root);
    Ok(files)
}

/// Collect the files staged for commit.
///
/// Git gives `pre-commit` no input, so the index is the only source of changed
/// paths for that hook. Deleted files are excluded by the diff filter.
///
/// # Errors
///
/// Returns `HookError::Spawn` if git cannot be started, or `HookError::Other`
/// if it exits with a non-zero status.
pub fn collect_staged_files(
    runner: &dyn ProcessRunner,
    root: &Path,
    settings: &Settings,
) -> Result<FileSet, HookError> {
    let command = CommandSpec::new(&settings.git_binary)
        .args(["diff", "--cached", "--name-only", "--diff-filter=ACMR", "-z"])
        .current_dir(root);
    let output = runner.run(&command)?;

    if !output.is_success() {
        return Err(HookError::Other(format!(
            "git diff failed: {}",
            output.error_text()
        )));
    }

    let mut files = FileSet::new();
    files.extend_from_output(&output.stdout);
    files.retain_existing(root);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockRunner, ProcessOutput};
    use std::process::Command;
    use tempfile::TempDir;

    const A: &str = "1111111111111111111111111111111111111111";
    const B: &str = "2222222222222222222222222222222222222222";
    const C: &str = "3333333333333333333333333333333333333333";

    fn update(local: &str, remote: &str) -> RefUpdate {
        RefUpdate {
            local_ref: "refs/heads/main".into(),
            local_sha: local.parse().unwrap(),
            remote_ref: "refs/heads/main".into(),
            remote_sha: remote.parse().unwrap(),
        }
    }

    fn touch(root: &Path, path: &str) {
        let full = root.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, "<?php\n").unwrap();
    }

    #[test]
    fn diff_tree_command_line() {
        let cmd = diff_tree_command(&Settings::default(), Path::new("/repo"), &update(A, B));
        insta::assert_snapshot!(
            cmd.to_string(),
            @"git diff-tree --no-commit-id --name-only -r -z 1111111111111111111111111111111111111111 2222222222222222222222222222222222222222"
        );
        assert_eq!(cmd.current_dir.as_deref(), Some(Path::new("/repo")));
    }

    #[test]
    fn unions_and_deduplicates_ranges() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/Foo.php");
        touch(tmp.path(), "src/Bar.php");
        touch(tmp.path(), "composer.json");

        let runner = MockRunner::new()
            .on(
                "git",
                &["diff-tree", "--no-commit-id", "--name-only", "-r", "-z", A],
                ProcessOutput::success("src/Foo.php\0composer.json\0src/Foo.php\0"),
            )
            .on(
                "git",
                &["diff-tree", "--no-commit-id", "--name-only", "-r", "-z", B],
                ProcessOutput::success("src/Bar.php\0composer.json\0\0"),
            );

        let files = collect_changed_files(
            &[update(A, C), update(B, C)],
            &runner,
            tmp.path(),
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(
            files.iter().collect::<Vec<_>>(),
            vec!["composer.json", "src/Bar.php", "src/Foo.php"]
        );
        assert_eq!(runner.calls_to("git").len(), 2);
    }

    #[test]
    fn drops_paths_missing_from_the_working_tree() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/Kept.php");

        let runner = MockRunner::new().on(
            "git",
            &["diff-tree"],
            ProcessOutput::success("src/Kept.php\0src/Deleted.php\0"),
        );

        let files =
            collect_changed_files(&[update(A, B)], &runner, tmp.path(), &Settings::default())
                .unwrap();

        assert!(files.contains("src/Kept.php"));
        assert!(!files.contains("src/Deleted.php"));
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn empty_diff_output_is_an_empty_contribution() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new().on(
            "git",
            &["diff-tree"],
            ProcessOutput::failure(128, "", "fatal: bad object"),
        );

        let files =
            collect_changed_files(&[update(A, B)], &runner, tmp.path(), &Settings::default())
                .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn no_updates_runs_no_process() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let files = collect_changed_files(&[], &runner, tmp.path(), &Settings::default()).unwrap();
        assert!(files.is_empty());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn staged_files_fail_when_git_fails() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new().on(
            "git",
            &["diff", "--cached"],
            ProcessOutput::failure(128, "", "fatal: not a git repository"),
        );

        let result = collect_staged_files(&runner, tmp.path(), &Settings::default());
        assert!(matches!(result, Err(HookError::Other(msg)) if msg.contains("not a git repository")));
    }

    #[test]
    fn collects_staged_files_from_a_real_repository() {
        let tmp = TempDir::new().unwrap();
        Command::new("git")
            .args(["init"])
            .current_dir(tmp.path())
            .output()
            .expect("git init failed");

        touch(tmp.path(), "src/Staged.php");
        touch(tmp.path(), "src/Untracked.php");
        Command::new("git")
            .args(["add", "src/Staged.php"])
            .current_dir(tmp.path())
            .output()
            .expect("git add failed");

        let files = collect_staged_files(
            &crate::process::SystemRunner,
            tmp.path(),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["src/Staged.php"]);
    }

    #[test]
    fn staged_paths_come_back_unquoted() {
        let tmp = TempDir::new().unwrap();
        Command::new("git")
            .args(["init"])
            .current_dir(tmp.path())
            .output()
            .expect("git init failed");

        for path in ["src/Ünï.php", "src/tab\there.php", "src/\"quoted\".php"] {
            touch(tmp.path(), path);
        }
        Command::new("git")
            .args(["add", "src"])
            .current_dir(tmp.path())
            .output()
            .expect("git add failed");

        let files = collect_staged_files(
            &crate::process::SystemRunner,
            tmp.path(),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains("src/Ünï.php"));
        assert!(files.contains("src/tab\there.php"));
        assert!(files.contains("src/\"quoted\".php"));
    }

    #[test]
    fn output_is_split_on_nul_only() {
        let mut files = FileSet::new();
        files.extend_from_output("src/a b.php\0src/line\nbreak.php\0\0");
        assert_eq!(
            files.iter().collect::<Vec<_>>(),
            vec!["src/a b.php", "src/line\nbreak.php"]
        );
    }

    #[test]
    fn file_set_from_iter_skips_empty_paths() {
        let files: FileSet = ["b.php", "", "a.php", "b.php"].into_iter().collect();
        assert_eq!(files.iter().collect::<Vec<_>>(), vec!["a.php", "b.php"]);
    }
}
