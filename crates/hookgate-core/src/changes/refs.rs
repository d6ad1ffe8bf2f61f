use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::HookError;

/// Object name git sends for a ref that does not exist on one side.
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// Local ref git sends when a push deletes a remote branch.
pub const DELETE_REF: &str = "(delete)";

static SHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{40}$").unwrap());

/// A full SHA-1 object name: exactly 40 hex digits.
///
/// Only [`FromStr`] constructs one, so a `Sha` is always safe to hand to git.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha(String);

impl Sha {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == NULL_SHA
    }
}

impl FromStr for Sha {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if SHA_RE.is_match(s) {
            Ok(Sha(s.to_ascii_lowercase()))
        } else {
            Err(HookError::InvalidSha(s.to_string()))
        }
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of `pre-push` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    pub local_ref: String,
    pub local_sha: Sha,
    pub remote_ref: String,
    pub remote_sha: Sha,
}

/// What the hook input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInput {
    /// A branch is being deleted (or there is no local branch): skip every check.
    Bypass,
    Updates(Vec<RefUpdate>),
}

enum Line {
    Bypass,
    Update(RefUpdate),
}

fn parse_line(line_no: usize, line: &str) -> Result<Line, HookError> {
    let input_error = |reason: String| HookError::InputFormat {
        line: line_no,
        content: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [local_ref, local_sha, remote_ref, remote_sha] = fields[..] else {
        return Err(input_error(format!(
            "expected 4 fields, found {}",
            fields.len()
        )));
    };

    if local_ref == DELETE_REF || local_sha == NULL_SHA {
        return Ok(Line::Bypass);
    }

    let parse_sha = |raw: &str| raw.parse::<Sha>().map_err(|e| input_error(e.to_string()));

    Ok(Line::Update(RefUpdate {
        local_ref: local_ref.to_string(),
        local_sha: parse_sha(local_sha)?,
        remote_ref: remote_ref.to_string(),
        remote_sha: parse_sha(remote_sha)?,
    }))
}

/// Read hook input until end-of-stream or the first blank line.
///
/// Returns [`HookInput::Bypass`] as soon as a deletion line is seen, without
/// reading further. Every line is parsed before the caller starts any process, so
/// a malformed line fails the run up front.
pub fn read_hook_input<R: BufRead>(reader: R) -> Result<HookInput, HookError> {
    let mut updates = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        match parse_line(index + 1, line)? {
            Line::Bypass => return Ok(HookInput::Bypass),
            Line::Update(update) => updates.push(update),
        }
    }

    Ok(HookInput::Updates(updates))
}
