//! Error types for substreams-versions

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SubstreamsError
pub type Result<T> = std::result::Result<T, SubstreamsError>;

/// Main error type for substreams-versions operations
#[derive(Debug, Error)]
pub enum SubstreamsError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest-related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Manifest-related errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("Manifest not found at {0}")]
    NotFound(PathBuf),

    /// Manifest content is not well-formed
    #[error("Failed to parse manifest {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Manifest has no readable `package.version`
    #[error("Manifest for module '{0}' has no package.version field")]
    MissingVersion(String),

    /// Failed to write manifest
    #[error("Failed to write manifest {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Module is not part of the workspace
    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version string does not parse as a semantic version
    #[error("Invalid version format '{version}': {reason}")]
    InvalidFormat { version: String, reason: String },

    /// Incremented version component does not fit in 64 bits
    #[error("Cannot apply {kind} bump to '{version}': version component overflows")]
    Overflow { version: String, kind: String },

    /// Bump kind is not one of major, minor, patch
    #[error("Invalid bump kind '{0}': expected major, minor, or patch")]
    InvalidBumpKind(String),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Failed to run git
    #[error("Failed to run git: {0}")]
    CommandFailed(String),

    /// git exited unsuccessfully
    #[error("git diff against '{reference}' failed: {stderr}")]
    DiffFailed { reference: String, stderr: String },
}
