use crate::changes::FileSet;
use crate::error::HookError;
use crate::types::hook::HookKind;
use crate::types::settings::Settings;

use super::{
    CheckContext, CheckResult, ComposerCheck, Stage, StageKind, StyleCheck, SyntaxCheck,
    UnitTestCheck,
};

/// Every stage in execution order. Hooks run a subsequence of this.
pub const STAGE_ORDER: [StageKind; 4] = [
    StageKind::Composer,
    StageKind::Syntax,
    StageKind::Style,
    StageKind::UnitTests,
];

/// Whether `hook` runs `stage` under `settings`.
pub fn hook_runs_stage(hook: HookKind, stage: StageKind, settings: &Settings) -> bool {
    match stage {
        StageKind::Composer => hook == HookKind::PrePush,
        StageKind::Syntax | StageKind::Style => true,
        StageKind::UnitTests => settings.unit_tests,
    }
}

fn build_stage(kind: StageKind) -> Box<dyn Stage> {
    match kind {
        StageKind::Composer => Box::new(ComposerCheck),
        StageKind::Syntax => Box::new(SyntaxCheck),
        StageKind::Style => Box::new(StyleCheck),
        StageKind::UnitTests => Box::new(UnitTestCheck),
    }
}

/// Receives progress while a pipeline runs.
pub trait PipelineObserver {
    /// Called once with the files the run will check, before any stage starts.
    fn files_collected(&mut self, _files: &FileSet) {}
    fn stage_started(&mut self, stage: StageKind);
    fn stage_finished(&mut self, result: &CheckResult);
    /// Called instead of `stage_finished` when a stage could not run at all.
    fn stage_aborted(&mut self, _stage: StageKind, _error: &HookError) {}
}

/// An observer that ignores every event.
impl PipelineObserver for () {
    fn stage_started(&mut self, _stage: StageKind) {}
    fn stage_finished(&mut self, _result: &CheckResult) {}
}

/// An ordered list of stages that stops at the first failure.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// The stages `hook` runs, in registry order.
    pub fn for_hook(hook: HookKind, settings: &Settings) -> Self {
        Self::new(
            STAGE_ORDER
                .into_iter()
                .filter(|stage| hook_runs_stage(hook, *stage, settings))
                .map(build_stage)
                .collect(),
        )
    }

    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind()).collect()
    }

    /// Run every stage in order against `files`.
    ///
    /// Returns the results of all stages when each passed.
    ///
    /// # Errors
    ///
    /// The first failing stage ends the run with its stage-specific error
    /// (`ManifestInconsistency`, `Syntax`, `StyleViolation`, `UnitTests`); later
    /// stages do not run. Errors from starting a tool propagate unchanged.
    pub fn run(
        &self,
        files: &FileSet,
        ctx: &CheckContext<'_>,
        observer: &mut dyn PipelineObserver,
    ) -> Result<Vec<CheckResult>, HookError> {
        let mut results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            observer.stage_started(stage.kind());
            let result = match stage.run(files, ctx) {
                Ok(result) => result,
                Err(e) => {
                    observer.stage_aborted(stage.kind(), &e);
                    return Err(e);
                }
            };
            observer.stage_finished(&result);

            if !result.passed {
                return Err(stage.kind().failure(&result));
            }
            results.push(result);
        }

        Ok(results)
    }
}
