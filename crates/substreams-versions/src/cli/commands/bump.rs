//! Bump command

use clap::Args;
use console::style;
use tracing::info;

use substreams_versions_core::{BumpKind, VersionBump};

use super::input::{collect_changed_files, split_bump_kind};
use crate::cli::output::{self, module_style, version_style};
use crate::cli::{Cli, OutputFormat};

/// Bump the version of every module impacted by changed files
#[derive(Debug, Args)]
pub struct BumpCommand {
    /// Changed files, as paths or a single JSON array, followed by the bump
    /// kind (major, minor, patch) unless --kind is given
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Bump kind (major, minor, patch)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Use files changed between REF and HEAD instead
    #[arg(long, value_name = "REF")]
    pub since: Option<String>,

    /// Show planned bumps without writing manifests
    #[arg(long)]
    pub dry_run: bool,
}

impl BumpCommand {
    /// Execute the bump command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let (files, kind) = split_bump_kind(&self.args, self.kind.as_deref())?;
        info!(kind = %kind, dry_run = self.dry_run, since = ?self.since, "executing bump command");

        let workspace = cli.open_workspace()?;
        let changed = collect_changed_files(files, self.since.as_deref(), workspace.root())?;
        let modules = workspace.modified_modules(&changed);

        let bumps = workspace.plan_bumps(&modules, kind)?;
        if !self.dry_run {
            workspace.apply_bumps(&bumps)?;
        }

        self.output(&bumps, kind, cli)
    }

    fn output(&self, bumps: &[VersionBump], kind: BumpKind, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => {
                if self.dry_run {
                    println!("{}", serde_json::to_string_pretty(bumps)?);
                }
            }
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }

                if bumps.is_empty() {
                    output::info("No modules impacted");
                    return Ok(());
                }

                let title = if self.dry_run {
                    format!("Planned {} bumps", kind)
                } else {
                    format!("Applied {} bumps", kind)
                };
                println!("{}", output::header(&title));
                println!();
                for bump in bumps {
                    println!(
                        "  {}  {} -> {}",
                        module_style().apply_to(&bump.module),
                        style(&bump.current_version).dim(),
                        version_style().apply_to(&bump.new_version)
                    );
                }

                if !self.dry_run {
                    println!();
                    output::success(&format!("Updated {} manifests", bumps.len()));
                }
            }
        }
        Ok(())
    }
}
