//! Turning git's hook input into the set of files a hook run should check.
//!
//! [`refs`] parses the `pre-push` update lines, [`files`] asks git which paths
//! changed and keeps the ones still present in the working tree.

pub mod files;
pub mod refs;

pub use files::{collect_changed_files, collect_staged_files, FileSet};
pub use refs::{read_hook_input, HookInput, RefUpdate, Sha, DELETE_REF, NULL_SHA};
