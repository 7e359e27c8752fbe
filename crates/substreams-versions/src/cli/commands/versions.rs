//! Versions command

use std::fmt::Write;

use clap::Args;
use tracing::info;

use crate::cli::output::{module_style, version_style};
use crate::cli::{Cli, OutputFormat};

/// Show the current version of every module
#[derive(Debug, Args)]
pub struct VersionsCommand {}

impl VersionsCommand {
    /// Execute the versions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing versions command");
        print!("{}", self.report(cli)?);
        Ok(())
    }

    fn report(&self, cli: &Cli) -> anyhow::Result<String> {
        let workspace = cli.open_workspace()?;
        let versions = workspace.snapshot().versions()?;

        let mut out = String::new();
        match cli.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&versions)?)?;
            }
            OutputFormat::Text => {
                let width = versions.keys().map(String::len).max().unwrap_or(0);
                for (module, version) in &versions {
                    writeln!(
                        out,
                        "{}  {}",
                        module_style().apply_to(format!("{:width$}", module, width = width)),
                        version_style().apply_to(version)
                    )?;
                }
            }
        }
        Ok(out)
    }
}
