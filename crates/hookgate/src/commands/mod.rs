pub mod hooks;
pub mod run;

use std::path::{Path, PathBuf};

use hookgate_core::discovery::discover_project_root;

use crate::output::Reporter;

/// The project root: `--root` when given, else the enclosing git repository.
pub(crate) fn resolve_root(root_override: Option<&str>, reporter: &mut Reporter) -> Option<PathBuf> {
    if let Some(root) = root_override {
        return Some(PathBuf::from(root));
    }

    let cwd = match std::env::current_dir() {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&format!("Cannot get current directory: {e}"));
            return None;
        }
    };

    match discover_project_root(Path::new(&cwd)) {
        Ok(root) => Some(root),
        Err(e) => {
            reporter.error(&format!("{e}"));
            None
        }
    }
}
