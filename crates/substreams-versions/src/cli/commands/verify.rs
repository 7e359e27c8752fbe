//! Verify command

use std::collections::BTreeMap;

use clap::Args;
use tracing::{info, warn};

use substreams_versions_core::monorepo::find_unbumped;
use substreams_versions_core::ModuleName;

use super::input::parse_json;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Impacted modules whose version did not change
#[derive(Debug, thiserror::Error)]
#[error("The following substreams have not been updated: {}", .0.join(", "))]
pub struct UnbumpedModules(pub Vec<ModuleName>);

/// Check that impacted modules had their version bumped
#[derive(Debug, Args)]
pub struct VerifyCommand {
    /// Versions before the change, as a JSON object of module to version
    #[arg(value_name = "PREVIOUS")]
    pub previous: String,

    /// Versions after the change, as a JSON object of module to version
    #[arg(value_name = "CURRENT")]
    pub current: String,

    /// Impacted modules, as a JSON array
    #[arg(value_name = "MODULES")]
    pub modules: String,
}

impl VerifyCommand {
    /// Execute the verify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing verify command");
        let (checked, unbumped) = self.unbumped()?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&unbumped)?);
            }
            OutputFormat::Text => {
                if unbumped.is_empty() && !cli.quiet {
                    output::success(&format!("All {} impacted modules were bumped", checked));
                }
            }
        }

        if unbumped.is_empty() {
            Ok(())
        } else {
            Err(UnbumpedModules(unbumped).into())
        }
    }

    /// Number of checked modules and those among them left unbumped
    fn unbumped(&self) -> anyhow::Result<(usize, Vec<ModuleName>)> {
        let previous: BTreeMap<ModuleName, String> = parse_json(&self.previous, "previous versions")?;
        let current: BTreeMap<ModuleName, String> = parse_json(&self.current, "current versions")?;
        let modules: Vec<ModuleName> = parse_json(&self.modules, "impacted modules")?;

        let unbumped = find_unbumped(&previous, &current, &modules);
        for module in &unbumped {
            warn!(module = %module, "version not bumped");
        }
        Ok((modules.len(), unbumped))
    }
}
