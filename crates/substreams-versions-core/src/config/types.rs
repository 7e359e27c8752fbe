//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::{DEFAULT_MANIFEST_FILE, DEFAULT_VERSION_PREFIX};

/// Main configuration for substreams-versions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest configuration
    pub manifest: ManifestConfig,

    /// Change input configuration
    pub changes: ChangesConfig,

    /// Shared library directories mapped to the modules that depend on them
    pub shared_libraries: BTreeMap<String, Vec<String>>,
}

/// Manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// File name of the manifest inside each module directory
    pub file_name: String,

    /// Prefix written in front of bumped versions
    pub version_prefix: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_MANIFEST_FILE.to_string(),
            version_prefix: DEFAULT_VERSION_PREFIX.to_string(),
        }
    }
}

/// Change input configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesConfig {
    /// Glob patterns for changed files that never impact a module
    pub exclude: Vec<String>,
}
