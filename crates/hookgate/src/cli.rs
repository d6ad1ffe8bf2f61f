use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "hookgate",
    version,
    about = "Git hook installer and quality gate for PHP projects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Project root (overrides discovery of the enclosing git repository)
    #[arg(long, global = true)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a hook's checks against git's hook input on stdin
    Run {
        #[command(subcommand)]
        hook: RunHook,
    },

    /// Install or remove the git hooks (composer lifecycle scripts)
    Hooks {
        #[command(subcommand)]
        action: HooksAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum RunHook {
    /// Lint and style-check staged files
    PreCommit,
    /// Validate composer files, lint and style-check pushed files
    PrePush,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum HooksAction {
    /// Remove installed hooks (run before composer install/update)
    #[command(alias = "uninstall")]
    Pre,
    /// Install hooks from the package (run after composer install/update)
    #[command(alias = "install")]
    Post,
}
