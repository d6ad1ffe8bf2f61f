use colored::*;
use hookgate_core::changes::FileSet;
use hookgate_core::check::{CheckResult, PipelineObserver, StageKind};
use hookgate_core::ci::install_hooks::InstallReport;
use hookgate_core::error::{Diagnostic, HookError, Severity};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
}

/// Reporter handles all output formatting.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
    spinner: Option<ProgressBar>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
            spinner: None,
        }
    }

    fn push_json(&mut self, result_type: &str, message: &str, stage: Option<StageKind>) {
        self.json_results.push(JsonResultEntry {
            result_type: result_type.to_string(),
            message: message.to_string(),
            stage: stage.map(|s| s.name().to_string()),
            path: None,
            details: None,
        });
    }

    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "ERROR:".red(), message);
            }
            OutputMode::Json => self.push_json("error", message, None),
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {}", "WARNING:".yellow(), message);
            }
            OutputMode::Json => self.push_json("warning", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.push_json("success", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "INFO:".blue(), message);
            }
            OutputMode::Json => self.push_json("info", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn section(&mut self, title: &str) {
        if self.mode == OutputMode::Human {
            println!("{}", format!("=== {title} ===").cyan());
        }
    }

    /// Show a spinner on stderr until [`Reporter::stop_spinner`]. Hidden unless
    /// stderr is a terminal.
    fn start_spinner(&mut self, message: &str) {
        if self.mode != OutputMode::Human {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn report_diagnostic(&mut self, stage: StageKind, diagnostic: &Diagnostic) {
        if self.mode == OutputMode::Json {
            self.json_results.push(JsonResultEntry {
                result_type: match diagnostic.severity {
                    Severity::Error => "error".to_string(),
                    Severity::Warning => "warning".to_string(),
                },
                message: diagnostic.message.clone(),
                stage: Some(stage.name().to_string()),
                path: diagnostic.path.as_ref().map(|p| p.display().to_string()),
                details: diagnostic.details.clone(),
            });
            return;
        }

        let mut msg = diagnostic.message.clone();
        if let Some(path) = &diagnostic.path {
            msg = format!("{msg} ({path})", path = path.display());
        }
        match diagnostic.severity {
            Severity::Error => self.error(&msg),
            Severity::Warning => self.warning(&msg),
        }

        let show_details = match diagnostic.severity {
            Severity::Error => true,
            Severity::Warning => self.mode == OutputMode::Human,
        };
        if let (true, Some(details)) = (show_details, &diagnostic.details) {
            for line in details.lines() {
                eprintln!("  {}", line.dimmed());
            }
        }
    }

    pub fn report_install(&mut self, report: &InstallReport) {
        if !report.hooks_dir_present {
            self.info("No git hooks directory found, nothing to do");
            return;
        }
        for notice in &report.notices {
            if notice.is_success() {
                self.success(&notice.message());
            } else {
                self.warning(&notice.message());
            }
        }
    }

    pub fn finish(&mut self) {
        self.stop_spinner();
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: self.json_results.clone(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{json}");
            }
        }
    }
}

impl PipelineObserver for Reporter {
    fn files_collected(&mut self, files: &FileSet) {
        self.info(&format!("{} changed file(s) to check", files.len()));
    }

    fn stage_started(&mut self, stage: StageKind) {
        self.section(stage.title());
        self.start_spinner(stage.title());
    }

    fn stage_aborted(&mut self, _stage: StageKind, _error: &HookError) {
        self.stop_spinner();
    }

    fn stage_finished(&mut self, result: &CheckResult) {
        self.stop_spinner();
        for diagnostic in &result.diagnostics {
            self.report_diagnostic(result.stage, diagnostic);
        }
        if result.passed {
            match self.mode {
                OutputMode::Json => self.push_json("success", &result.message, Some(result.stage)),
                _ => self.success(&result.message),
            }
        }
    }
}
