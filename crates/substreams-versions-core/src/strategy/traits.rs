//! Version strategy traits

use crate::error::Result;
use crate::types::BumpKind;

use super::types::VersionComponents;

/// Trait for version strategies
pub trait VersionStrategy: Send + Sync {
    /// Parse a version string into components
    fn parse(&self, version: &str) -> Result<VersionComponents>;

    /// Format version components into a string
    fn format(&self, components: &VersionComponents) -> String;

    /// Bump the version according to the bump kind.
    ///
    /// Fails when the incremented component does not fit.
    fn bump(&self, current: &VersionComponents, kind: BumpKind) -> Result<VersionComponents>;

    /// Parse, bump and format in one step
    fn next_version(&self, current: &str, kind: BumpKind) -> Result<String> {
        let parsed = self.parse(current)?;
        Ok(self.format(&self.bump(&parsed, kind)?))
    }
}
