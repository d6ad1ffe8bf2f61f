use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed hook input on line {line}: {reason} (got {content:?})")]
    InputFormat {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Invalid object name: {0:?}")]
    InvalidSha(String),

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No git repository found at or above {0}")]
    ProjectNotFound(PathBuf),

    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    #[error("Composer check failed: {0}")]
    ManifestInconsistency(String),

    #[error("Syntax check failed: there are PHP syntax errors in {} file(s)", files.len())]
    Syntax { files: Vec<String> },

    #[error("Style check failed: {0}")]
    StyleViolation(String),

    #[error("Unit tests failed: {0}")]
    UnitTests(String),

    #[error("{0}")]
    Other(String),
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding produced by a check stage.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub path: Option<PathBuf>,
    /// Raw output of the external tool, if any.
    pub details: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            path: None,
            details: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            path: None,
            details: None,
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Attach tool output. Blank output is dropped.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        if !details.trim().is_empty() {
            self.details = Some(details);
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
