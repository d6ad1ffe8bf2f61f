use std::fmt;
use std::str::FromStr;

use crate::error::HookError;

/// The git hooks this tool installs and runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    PreCommit,
    PrePush,
}

impl HookKind {
    /// Every managed hook, in installation order.
    pub const ALL: [HookKind; 2] = [HookKind::PrePush, HookKind::PreCommit];

    /// The file name git expects under `.git/hooks/`.
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::PrePush => "pre-push",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookKind {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookKind::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| HookError::UnknownHook(s.to_string()))
    }
}
