//! Core types for substreams-versions

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// Name of a substream module: its top-level directory under the repository root
pub type ModuleName = String;

/// Kind of semantic version increment applied to impacted modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    /// Major version bump (zeroes minor and patch)
    Major,
    /// Minor version bump (zeroes patch)
    Minor,
    /// Patch version bump
    Patch,
}

impl BumpKind {
    /// Returns the string representation of the bump kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl std::fmt::Display for BumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BumpKind {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(VersionError::InvalidBumpKind(s.to_string())),
        }
    }
}
