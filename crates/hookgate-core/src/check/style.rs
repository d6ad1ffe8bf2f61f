use crate::changes::FileSet;
use crate::error::{Diagnostic, HookError};
use crate::process::CommandSpec;

use super::{path_arg, CheckContext, CheckResult, Stage, StageKind};

/// Dry-runs php-cs-fixer over the changed PHP files of the source directory.
///
/// The fixer runs once for the whole file list, never writes files, and never
/// reads its cache.
#[derive(Debug, Default)]
pub struct StyleCheck;

impl StyleCheck {
    /// The changed `.php` files under the configured source directory.
    pub fn select<'f>(files: &'f FileSet, source_prefix: &str) -> Vec<&'f str> {
        files
            .iter()
            .filter(|f| f.starts_with(source_prefix) && f.ends_with(".php"))
            .collect()
    }

    pub fn fixer_command(ctx: &CheckContext<'_>, files: &[&str]) -> CommandSpec {
        // `-v` keeps composer from swallowing the fixer's own errors.
        CommandSpec::new(&ctx.settings.composer_binary)
            .args(["exec", "-v", "php-cs-fixer", "--", "fix"])
            .arg(format!("--config={}", ctx.settings.fixer_config))
            .args(["--dry-run", "--stop-on-violation", "--using-cache=no"])
            .args(files.iter().map(|f| path_arg(f)))
            .current_dir(ctx.project_root)
    }
}

impl Stage for StyleCheck {
    fn kind(&self) -> StageKind {
        StageKind::Style
    }

    fn run(&self, files: &FileSet, ctx: &CheckContext<'_>) -> Result<CheckResult, HookError> {
        let selected = Self::select(files, &ctx.settings.source_prefix());
        if selected.is_empty() {
            return Ok(CheckResult::pass(StageKind::Style, "No PHP sources to check"));
        }

        let output = ctx.runner.run(&Self::fixer_command(ctx, &selected))?;

        if output.is_success() {
            Ok(CheckResult::pass(
                StageKind::Style,
                format!("{} file(s) follow the coding standard", selected.len()),
            ))
        } else {
            Ok(
                CheckResult::fail(StageKind::Style, "There are coding standards violations!")
                    .with_diagnostic(
                        Diagnostic::error("php-cs-fixer reported violations")
                            .with_details(output.combined()),
                    ),
            )
        }
    }
}
