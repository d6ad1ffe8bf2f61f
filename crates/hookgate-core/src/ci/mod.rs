//! Git hook support: running the quality gate and installing the hook scripts.
//!
//! [`hooks`] is what an installed `pre-commit`/`pre-push` script calls into;
//! [`install_hooks`] copies those scripts into `.git/hooks/` around composer's
//! install and update events.

pub mod hooks;
pub mod install_hooks;

pub use hooks::{gather_files, run_hook, RunOutcome};
pub use install_hooks::{hook_specs, install_hooks, remove_hooks, HookSpec, InstallReport};
