//! Command-line interface.

pub mod clipboard;
pub mod completions;
pub mod create;
pub mod get;
pub mod list;
pub mod output;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{self, Config};
use crate::core::constants;
use crate::core::matcher::MatchMode;
use crate::core::registry::{self, Registry};
use crate::error::Result;

/// pwstore - hierarchical secret store.
#[derive(Parser)]
#[command(
    name = "pwstore",
    about = "Stores information in files",
    version,
    after_help = "Backends are directories containing a storage.conf file."
)]
pub struct Cli {
    /// Configuration file to use
    #[arg(short, long, global = true, env = "PWSTORE_CONFIG", default_value = constants::GLOBAL_CONFIG)]
    pub config: String,

    /// Directory with storage backends (overrides the configuration)
    #[arg(short, long, global = true, env = "PWSTORE_DIRECTORY")]
    pub directory: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pattern interpretation flags shared by lookup commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct MatchArgs {
    /// Use regular expression matcher (default)
    #[arg(short = 'r', long = "regexp", conflicts_with = "literal")]
    pub regexp: bool,

    /// Match the pattern as literal text
    #[arg(short = 'F', long)]
    pub literal: bool,
}

impl MatchArgs {
    pub fn mode(&self) -> MatchMode {
        if self.literal {
            MatchMode::Literal
        } else {
            MatchMode::Regex
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show keys matching <pattern> (or all)
    #[command(visible_alias = "ls")]
    List {
        /// Pattern for the wanted keys
        #[arg(default_value = "")]
        pattern: String,
        #[command(flatten)]
        matcher: MatchArgs,
    },

    /// Get the password (first line) from an entry described by <pattern>
    #[command(visible_alias = "g")]
    Get {
        /// Pattern for the wanted entry
        pattern: String,
        #[command(flatten)]
        matcher: MatchArgs,
        /// Set clipboard instead of printing to stdout
        #[arg(long)]
        clipboard: bool,
    },

    /// Show the entry described by <pattern>
    #[command(visible_alias = "sh")]
    Show {
        /// Pattern for the wanted entry
        pattern: String,
        #[command(flatten)]
        matcher: MatchArgs,
    },

    /// Create a new entry for <key> in an existing storage, reading stdin
    Create {
        /// Storage (backend) name
        storage: String,
        /// Key for the new entry
        key: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Where the storage directory comes from.
pub struct Location {
    config: String,
    directory: Option<String>,
}

impl Location {
    /// Storage directory: the explicit override, else the configuration's.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(directory) = &self.directory {
            return config::expand_home(directory);
        }
        let path = config::expand_home(&self.config)?;
        Config::load(&path)?.storage_dir()
    }

    /// Discovered backends of the storage directory.
    pub fn registry(&self) -> Result<Arc<Registry>> {
        registry::backends(&self.storage_dir()?)
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let location = Location {
        config: cli.config,
        directory: cli.directory,
    };

    match cli.command {
        List { pattern, matcher } => {
            let registry = location.registry()?;
            list::execute(&registry, &pattern, matcher.mode())
        }
        Get {
            pattern,
            matcher,
            clipboard,
        } => {
            let registry = location.registry()?;
            get::execute(&registry, &pattern, matcher.mode(), clipboard)
        }
        Show { pattern, matcher } => {
            let registry = location.registry()?;
            show::execute(&registry, &pattern, matcher.mode())
        }
        Create { storage, key } => {
            let registry = location.registry()?;
            create::execute(&registry, &storage, &key)
        }
        Completions { shell } => completions::execute(shell),
    }
}
