use serde::Deserialize;

/// Project settings, read from the `extra.hookgate` object of `composer.json`.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Directory whose PHP files are style-checked.
    pub source_dir: String,
    /// php-cs-fixer configuration file, relative to the project root.
    pub fixer_config: String,
    /// Where the package (and its `hooks/` scripts) is installed.
    pub package_dir: String,
    pub php_binary: String,
    pub composer_binary: String,
    pub git_binary: String,
    /// Append the PHPUnit stage to both hooks.
    pub unit_tests: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            fixer_config: ".php_cs".to_string(),
            package_dir: "vendor/hookgate/hookgate".to_string(),
            php_binary: "php".to_string(),
            composer_binary: "composer".to_string(),
            git_binary: "git".to_string(),
            unit_tests: false,
        }
    }
}

impl Settings {
    /// The source directory as a path prefix (`"src/"`), or `""` for the whole tree.
    pub fn source_prefix(&self) -> String {
        let dir = self.source_dir.trim();
        let dir = dir.strip_prefix("./").unwrap_or(dir).trim_matches('/');
        if dir.is_empty() || dir == "." {
            String::new()
        } else {
            format!("{dir}/")
        }
    }
}
