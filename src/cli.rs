//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ruleshare - sync rule files from remote sources
#[derive(Parser, Debug)]
#[command(
    name = "ruleshare",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Sync rule files from GitHub repositories and raw URLs",
    long_about = "ruleshare keeps a directory of named rule files in sync with remote \
                  sources (raw URLs, GitHub repositories, or configured aliases), \
                  tracking content fingerprints in a lock file so unchanged rules \
                  are skipped on later runs.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  ruleshare init\n    \
                  ruleshare add source kc github:kevincrabbe/kc-rules\n    \
                  ruleshare add typescript kc:typescript.md\n    \
                  ruleshare add-all kc:guides\n    \
                  ruleshare sync"
)]
pub struct Cli {
    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the shared.json config file
    Init,

    /// Add a rule, or a source alias with `add source <alias> <source>`
    Add(AddArgs),

    /// Add every markdown file under a GitHub source as a rule
    #[command(name = "add-all")]
    AddAll(AddAllArgs),

    /// Download rules whose remote content changed
    Sync(SyncArgs),

    /// Force re-download of all rules (same as `sync --force`)
    Update,

    /// Check configured rules for remote drift
    Status,

    /// List configured rules and sources
    #[command(visible_alias = "ls")]
    List,

    /// Remove a rule and its synced file
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add a rule from a direct URL:\n    ruleshare add general https://host/general.md\n\n\
                  Add a rule from GitHub:\n    ruleshare add general github:owner/repo/general.md\n\n\
                  Add a source alias:\n    ruleshare add source kc github:kevincrabbe/kc-rules\n\n\
                  Add a rule through an alias:\n    ruleshare add typescript kc:typescript.md")]
pub struct AddArgs {
    /// Rule name, or the literal word "source" to add an alias
    pub name: String,

    /// Source string (or the alias name when adding a source)
    pub source: String,

    /// Source string for the alias (only with `add source`)
    pub alias_source: Option<String>,
}

/// Arguments for the add-all command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add every .md file in a repository:\n    ruleshare add-all github:owner/repo\n\n\
                  Add every .md file under a path:\n    ruleshare add-all github:owner/repo/guides\n\n\
                  Through an alias:\n    ruleshare add-all kc:guides")]
pub struct AddAllArgs {
    /// GitHub source (or alias resolving to one) to import from
    pub source: String,
}

/// Arguments for the sync command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Re-download and re-record every rule regardless of fingerprint match
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Rule name to remove
    pub name: String,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
