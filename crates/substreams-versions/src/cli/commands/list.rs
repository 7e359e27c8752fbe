//! List command

use std::collections::BTreeMap;
use std::fmt::Write;

use clap::Args;
use console::style;
use tracing::info;

use substreams_versions_core::{ChangeReason, ModuleName};

use super::input::collect_changed_files;
use crate::cli::output::module_style;
use crate::cli::{Cli, OutputFormat};

/// List modules impacted by changed files
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Changed files, as paths or as a single JSON array
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Use files changed between REF and HEAD instead
    #[arg(long, value_name = "REF")]
    pub since: Option<String>,

    /// Show why each module is impacted
    #[arg(long)]
    pub reasons: bool,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(files = self.files.len(), since = ?self.since, "executing list command");
        print!("{}", self.report(cli)?);
        Ok(())
    }

    fn report(&self, cli: &Cli) -> anyhow::Result<String> {
        let workspace = cli.open_workspace()?;
        let changed = collect_changed_files(&self.files, self.since.as_deref(), workspace.root())?;
        let impact = workspace.impact(&changed);

        self.render(&impact, cli.format)
    }

    fn render(
        &self,
        impact: &BTreeMap<ModuleName, ChangeReason>,
        format: OutputFormat,
    ) -> anyhow::Result<String> {
        let mut out = String::new();
        match format {
            OutputFormat::Json => {
                let json = if self.reasons {
                    let reasons: BTreeMap<&str, String> = impact
                        .iter()
                        .map(|(module, reason)| (module.as_str(), reason.to_string()))
                        .collect();
                    serde_json::to_string(&reasons)?
                } else {
                    serde_json::to_string(&impact.keys().collect::<Vec<_>>())?
                };
                writeln!(out, "{}", json)?;
            }
            OutputFormat::Text => {
                for (module, reason) in impact {
                    if self.reasons {
                        writeln!(
                            out,
                            "{}  {}",
                            module_style().apply_to(module),
                            style(reason).dim()
                        )?;
                    } else {
                        writeln!(out, "{}", module)?;
                    }
                }
            }
        }
        Ok(out)
    }
}
