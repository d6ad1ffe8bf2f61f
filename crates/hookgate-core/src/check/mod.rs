//! Quality-gate stages run by the git hooks.
//!
//! Each stage implements [`Stage`] and receives the whole [`FileSet`]; picking
//! the files it cares about is the stage's own business. [`pipeline`] decides
//! which stages a hook runs and stops at the first failure.

pub mod composer;
pub mod pipeline;
pub mod style;
pub mod syntax;

use std::fmt;
use std::path::Path;

use crate::changes::FileSet;
use crate::error::{Diagnostic, HookError};
use crate::process::ProcessRunner;
use crate::types::settings::Settings;

pub use composer::ComposerCheck;
pub use pipeline::{Pipeline, PipelineObserver};
pub use style::StyleCheck;
pub use syntax::SyntaxCheck;
pub use unit_tests::UnitTestCheck;

/// Identity of a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Composer,
    Syntax,
    Style,
    UnitTests,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Composer => "composer",
            StageKind::Syntax => "syntax",
            StageKind::Style => "style",
            StageKind::UnitTests => "unit-tests",
        }
    }

    /// Banner shown while the stage runs.
    pub fn title(&self) -> &'static str {
        match self {
            StageKind::Composer => "Validating composer.json",
            StageKind::Syntax => "Running PHPLint",
            StageKind::Style => "Checking code style",
            StageKind::UnitTests => "Running unit tests",
        }
    }

    /// The fatal error raised when this stage fails.
    pub fn failure(&self, result: &CheckResult) -> HookError {
        match self {
            StageKind::Composer => HookError::ManifestInconsistency(result.message.clone()),
            StageKind::Syntax => HookError::Syntax {
                files: result
                    .diagnostics
                    .iter()
                    .filter(|d| d.is_error())
                    .filter_map(|d| d.path.as_ref())
                    .map(|p| p.display().to_string())
                    .collect(),
            },
            StageKind::Style => HookError::StyleViolation(result.message.clone()),
            StageKind::UnitTests => HookError::UnitTests(result.message.clone()),
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub stage: StageKind,
    pub passed: bool,
    pub message: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn pass(stage: StageKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            passed: true,
            message: message.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn fail(stage: StageKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            passed: false,
            message: message.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// `path` as a tool argument: a leading `-` gets a `./` prefix so it is never
/// read as an option.
pub fn path_arg(path: &str) -> String {
    if path.starts_with('-') {
        format!("./{path}")
    } else {
        path.to_string()
    }
}

/// Everything a stage needs besides the file set.
pub struct CheckContext<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub project_root: &'a Path,
    pub settings: &'a Settings,
}

/// A single gated check.
pub trait Stage {
    fn kind(&self) -> StageKind;

    /// Evaluate `files`.
    ///
    /// A failed check is an `Ok` result with `passed == false`; `Err` is reserved
    /// for not being able to run the check at all.
    fn run(&self, files: &FileSet, ctx: &CheckContext<'_>) -> Result<CheckResult, HookError>;
}
