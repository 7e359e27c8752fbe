//! A substreams repository opened for one invocation

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::manifest::ManifestStore;
use crate::strategy::SemVerStrategy;
use crate::types::{BumpKind, ModuleName};

use super::changes::{ChangeDetector, ChangeReason};
use super::graph::DependencyGraph;
use super::impact::ImpactPropagator;
use super::locator::ModuleLocator;
use super::snapshot::WorkspaceSnapshot;
use super::versioning::{VersionBump, VersionUpdater};

/// Repository state for one invocation.
///
/// Opening the workspace reads every manifest and builds the dependency graph.
/// All later queries and bump planning use that snapshot; only
/// [`Workspace::apply_bumps`] writes to disk.
pub struct Workspace {
    config: Config,
    store: ManifestStore,
    locator: ModuleLocator,
    strategy: SemVerStrategy,
    snapshot: WorkspaceSnapshot,
    graph: DependencyGraph,
}

impl Workspace {
    /// Open the repository at `root`
    pub fn open(root: &Path, config: Config) -> Result<Self> {
        let store = ManifestStore::new(root, config.manifest.file_name.clone());
        let locator = ModuleLocator::for_store(&store);
        let snapshot = WorkspaceSnapshot::load(&store, &locator)?;
        let graph = DependencyGraph::build(&snapshot, &locator);
        let strategy = SemVerStrategy::with_prefix(config.manifest.version_prefix.clone());

        info!(root = %root.display(), modules = snapshot.len(), "workspace opened");
        Ok(Self {
            config,
            store,
            locator,
            strategy,
            snapshot,
            graph,
        })
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Manifest snapshot taken when the workspace was opened
    pub fn snapshot(&self) -> &WorkspaceSnapshot {
        &self.snapshot
    }

    /// Every module impacted by `changed_files`, with the reason it is impacted
    pub fn impact(&self, changed_files: &[PathBuf]) -> BTreeMap<ModuleName, ChangeReason> {
        let detector = ChangeDetector::from_config(&self.locator, &self.config);
        let direct = detector
            .detect_changes(&self.snapshot, changed_files)
            .into_iter()
            .map(|(name, changed)| (name, changed.change_reason))
            .collect();

        ImpactPropagator::new(&self.graph).propagate(direct)
    }

    /// Names of every module impacted by `changed_files`
    pub fn modified_modules(&self, changed_files: &[PathBuf]) -> BTreeSet<ModuleName> {
        self.impact(changed_files).into_keys().collect()
    }

    /// Compute bumps for `modules` without writing anything
    pub fn plan_bumps<'m, I>(&self, modules: I, kind: BumpKind) -> Result<Vec<VersionBump>>
    where
        I: IntoIterator<Item = &'m ModuleName>,
    {
        self.updater().plan(&self.snapshot, modules, kind)
    }

    /// Persist planned bumps
    pub fn apply_bumps(&self, bumps: &[VersionBump]) -> Result<()> {
        self.updater().apply(&self.snapshot, bumps)
    }

    fn updater(&self) -> VersionUpdater<'_> {
        VersionUpdater::new(&self.store, &self.strategy)
    }
}
