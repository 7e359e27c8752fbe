//! substreams-versions core library
//!
//! Determines which substream modules of a monorepo are impacted by a set of
//! changed files, directly or through the modules they import, and bumps the
//! `package.version` of their manifests.

pub mod config;
pub mod error;
pub mod manifest;
pub mod monorepo;
pub mod strategy;
pub mod types;

pub use error::{ConfigError, GitError, ManifestError, Result, SubstreamsError, VersionError};
pub use manifest::{ManifestDocument, ManifestStore};
pub use monorepo::{
    ChangeReason, DependencyGraph, ImpactPropagator, ModuleLocator, VersionBump, VersionUpdater,
    Workspace, WorkspaceSnapshot,
};
pub use strategy::{SemVerStrategy, VersionStrategy};
pub use types::{BumpKind, ModuleName};
