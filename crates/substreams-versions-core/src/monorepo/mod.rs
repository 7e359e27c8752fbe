//! Monorepo support for substreams repositories
//!
//! This module provides the analysis pipeline run once per invocation:
//! - Module location from file paths
//! - A manifest snapshot of every module
//! - Dependency graph built from manifest imports
//! - Change detection and impact propagation to dependants
//! - Version bump planning and application

pub mod changes;
pub mod graph;
pub mod impact;
pub mod locator;
pub mod snapshot;
pub mod versioning;
pub mod workspace;

#[cfg(test)]
mod fixtures;

pub use changes::{changed_files_since, ChangeDetector, ChangeFilter, ChangeReason, ChangedModule};
pub use graph::{DependencyGraph, ModuleNode};
pub use impact::ImpactPropagator;
pub use locator::ModuleLocator;
pub use snapshot::WorkspaceSnapshot;
pub use versioning::{find_unbumped, VersionBump, VersionUpdater};
pub use workspace::Workspace;
