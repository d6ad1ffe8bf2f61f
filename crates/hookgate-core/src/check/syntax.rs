use std::sync::LazyLock;

use regex::Regex;

use crate::changes::FileSet;
use crate::error::{Diagnostic, HookError};
use crate::process::CommandSpec;

use super::{path_arg, CheckContext, CheckResult, Stage, StageKind};

static LINTABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(php|inc)$").unwrap());

/// Runs `php -l` on every changed `.php` and `.inc` file.
///
/// All files are linted even after the first failure so every broken file is
/// reported in one run.
#[derive(Debug, Default)]
pub struct SyntaxCheck;

impl SyntaxCheck {
    pub fn is_lintable(path: &str) -> bool {
        LINTABLE_RE.is_match(path)
    }
}

impl Stage for SyntaxCheck {
    fn kind(&self) -> StageKind {
        StageKind::Syntax
    }

    fn run(&self, files: &FileSet, ctx: &CheckContext<'_>) -> Result<CheckResult, HookError> {
        let mut checked = 0;
        let mut failures = Vec::new();

        for file in files.iter().filter(|f| Self::is_lintable(f)) {
            checked += 1;
            let command = CommandSpec::new(&ctx.settings.php_binary)
                .arg("-l")
                .arg(path_arg(file))
                .current_dir(ctx.project_root);
            let output = ctx.runner.run(&command)?;

            if !output.is_success() {
                failures.push(
                    Diagnostic::error(format!("Syntax error in {file}"))
                        .with_path(file)
                        .with_details(output.error_text()),
                );
            }
        }

        if failures.is_empty() {
            return Ok(CheckResult::pass(
                StageKind::Syntax,
                format!("{checked} file(s) linted"),
            ));
        }

        let mut result = CheckResult::fail(StageKind::Syntax, "There are PHP syntax errors!");
        result.diagnostics = failures;
        Ok(result)
    }
}
