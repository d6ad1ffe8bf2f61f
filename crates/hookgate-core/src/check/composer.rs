use crate::changes::FileSet;
use crate::error::{Diagnostic, HookError};
use crate::process::CommandSpec;

use super::{CheckContext, CheckResult, Stage, StageKind};

const COMPOSER_JSON: &str = "composer.json";
const COMPOSER_LOCK: &str = "composer.lock";

/// Keeps `composer.json` and `composer.lock` consistent.
///
/// | composer.json | composer.lock | result                        |
/// |---------------|---------------|-------------------------------|
/// | changed       | unchanged     | fail                          |
/// | changed       | changed       | `composer validate`           |
/// | unchanged     | changed       | `composer validate`           |
/// | unchanged     | unchanged     | pass                          |
///
/// A stale lock file is reported, never repaired.
#[derive(Debug, Default)]
pub struct ComposerCheck;

impl Stage for ComposerCheck {
    fn kind(&self) -> StageKind {
        StageKind::Composer
    }

    fn run(&self, files: &FileSet, ctx: &CheckContext<'_>) -> Result<CheckResult, HookError> {
        let json_changed = files.contains(COMPOSER_JSON);
        let lock_changed = files.contains(COMPOSER_LOCK);

        if json_changed && !lock_changed {
            return Ok(CheckResult::fail(
                StageKind::Composer,
                "composer.json was changed without updating composer.lock",
            )
            .with_diagnostic(
                Diagnostic::error("Run `composer update --lock` and commit composer.lock")
                    .with_path(COMPOSER_JSON),
            ));
        }

        if !json_changed && !lock_changed {
            return Ok(CheckResult::pass(
                StageKind::Composer,
                "composer.json and composer.lock unchanged",
            ));
        }

        let command = CommandSpec::new(&ctx.settings.composer_binary)
            .arg("validate")
            .current_dir(ctx.project_root);
        let output = ctx.runner.run(&command)?;

        if output.is_success() {
            Ok(CheckResult::pass(StageKind::Composer, "composer.json is valid"))
        } else {
            Ok(
                CheckResult::fail(StageKind::Composer, "There is a problem with your composer (lock) file!")
                    .with_diagnostic(
                        Diagnostic::error("composer validate failed").with_details(output.error_text()),
                    ),
            )
        }
    }
}
