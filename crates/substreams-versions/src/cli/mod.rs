//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use substreams_versions_core::config::load_config_or_default;
use substreams_versions_core::Workspace;

use commands::{BumpCommand, ListCommand, VerifyCommand, VersionsCommand};

/// substreams-versions - impact analysis and version bumping for substreams monorepos
#[derive(Debug, Parser)]
#[command(name = "substreams-versions")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    #[default]
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List modules impacted by changed files
    List(ListCommand),

    /// Bump the version of every module impacted by changed files
    Bump(BumpCommand),

    /// Show the current version of every module
    Versions(VersionsCommand),

    /// Check that impacted modules had their version bumped
    Verify(VerifyCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::List(ref cmd) => cmd.execute(&self),
            Commands::Bump(ref cmd) => cmd.execute(&self),
            Commands::Versions(ref cmd) => cmd.execute(&self),
            Commands::Verify(ref cmd) => cmd.execute(&self),
        }
    }

    /// Canonical repository root
    pub fn root(&self) -> anyhow::Result<PathBuf> {
        let dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        dir.canonicalize()
            .with_context(|| format!("cannot access repository root {}", dir.display()))
    }

    /// Load configuration and snapshot the repository
    pub fn open_workspace(&self) -> anyhow::Result<Workspace> {
        let root = self.root()?;
        let (config, source) = load_config_or_default(&root)?;
        if let Some(path) = source {
            debug!(config = %path.display(), "using configuration file");
        }
        Ok(Workspace::open(&root, config)?)
    }
}
