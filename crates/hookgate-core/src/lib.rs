pub mod changes;
pub mod check;
pub mod ci;
pub mod discovery;
pub mod error;
pub mod process;
pub mod types;

pub use error::{Diagnostic, HookError, Severity};
pub use types::*;
