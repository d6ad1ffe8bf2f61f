#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

pub fn hookgate_cmd() -> assert_cmd::Command {
    cargo_bin_cmd!("hookgate")
}

/// `php -l` stand-in: a file containing `SYNTAX_ERROR` fails to parse.
const FAKE_PHP: &str = r#"#!/bin/sh
file="$2"
if grep -q SYNTAX_ERROR "$file"; then
    echo "PHP Parse error:  syntax error, unexpected end of file in $file on line 2" >&2
    echo "Errors parsing $file"
    exit 255
fi
echo "No syntax errors detected in $file"
"#;

/// composer stand-in: `validate` fails when `.validate-fails` exists, the fixer
/// fails on any file containing `BAD_STYLE`. Every call is logged.
const FAKE_COMPOSER: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/composer.log"
case "$1" in
    validate)
        if [ -f .validate-fails ]; then
            echo "./composer.json is valid but your composer.lock has some errors" >&2
            exit 2
        fi
        echo "./composer.json is valid"
        ;;
    exec)
        status=0
        for arg in "$@"; do
            case "$arg" in
                *.php)
                    if grep -q BAD_STYLE "$arg"; then
                        echo "   1) $arg (braces)"
                        status=8
                    fi
                    ;;
            esac
        done
        exit $status
        ;;
esac
"#;

/// A git repository with stub `php` and `composer` binaries wired in through
/// `extra.hookgate`.
pub struct Project {
    pub repo: TempDir,
    pub tools: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let repo = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();

        write_executable(&tools.path().join("php"), FAKE_PHP);
        write_executable(&tools.path().join("composer"), FAKE_COMPOSER);

        let project = Self { repo, tools };
        project.git(&["init", "-q"]);
        project.write_composer_json("");
        project.write("README.md", "readme\n");
        project.commit("initial");
        project
    }

    pub fn root(&self) -> &Path {
        self.repo.path()
    }

    pub fn root_arg(&self) -> String {
        self.root().to_str().unwrap().to_string()
    }

    pub fn write_composer_json(&self, description: &str) {
        let doc = serde_json::json!({
            "name": "acme/app",
            "description": description,
            "extra": {
                "hookgate": {
                    "php-binary": self.tools.path().join("php"),
                    "composer-binary": self.tools.path().join("composer"),
                }
            }
        });
        self.write(
            "composer.json",
            &serde_json::to_string_pretty(&doc).unwrap(),
        );
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.root().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=hookgate",
                "-c",
                "user.email=hookgate@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.root())
            .output()
            .expect("git failed");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Stage everything and commit; returns the new HEAD.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// A `pre-push` input line pushing `local` over `remote`.
    pub fn push_line(&self, local: &str, remote: &str) -> String {
        format!("refs/heads/main {local} refs/heads/main {remote}\n")
    }

    /// Arguments of every composer invocation so far.
    pub fn composer_calls(&self) -> Vec<String> {
        fs::read_to_string(self.tools.path().join("composer.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.root().join(".git").join("hooks")
    }
}

pub fn write_executable(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
