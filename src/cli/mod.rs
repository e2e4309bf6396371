//! Command-line interface.

pub mod aliases;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// blt - build and launch tooling for Drupal projects hosted on Acquia Cloud.
#[derive(Parser)]
#[command(
    name = "blt",
    about = "Build and launch tooling for Acquia-hosted Drupal projects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate Drush site aliases for an Acquia Cloud application
    #[command(name = "generate:aliases:acquia")]
    GenerateAliasesAcquia {
        /// Acquia Cloud application UUID (overrides .blt.toml)
        #[arg(long, env = "BLT_CLOUD_APP_ID")]
        app_id: Option<String>,

        /// Pick the application from a list when no ID is configured
        #[arg(long)]
        select_app: bool,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    let repo_root = match cli.repo_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Command::GenerateAliasesAcquia { app_id, select_app } => aliases::execute(
            aliases::Request {
                repo_root,
                app_id: app_id.filter(|id| !id.trim().is_empty()),
                select_app,
            },
            cli.yes,
        ),
    }
}
