//! Applying version bumps to module manifests

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ManifestError, Result};
use crate::manifest::{ManifestDocument, ManifestStore};
use crate::strategy::VersionStrategy;
use crate::types::{BumpKind, ModuleName};

use super::snapshot::WorkspaceSnapshot;

/// A version bump to be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBump {
    /// Module name
    pub module: ModuleName,
    /// Current version
    pub current_version: String,
    /// New version
    pub new_version: String,
    /// Kind of increment
    pub kind: BumpKind,
}

/// Rewrites `package.version` in module manifests
pub struct VersionUpdater<'a> {
    store: &'a ManifestStore,
    strategy: &'a dyn VersionStrategy,
}

impl<'a> VersionUpdater<'a> {
    /// Create an updater writing through `store`
    pub fn new(store: &'a ManifestStore, strategy: &'a dyn VersionStrategy) -> Self {
        Self { store, strategy }
    }

    /// Load one module's manifest, bump its version and persist it
    pub fn bump(&self, module: &str, kind: BumpKind) -> Result<VersionBump> {
        let mut document = self.store.load(module)?;
        let bump = self.plan_one(module, &document, kind)?;
        self.write(&bump, &mut document)?;
        Ok(bump)
    }

    /// Compute the bumps for `modules` without writing anything.
    ///
    /// Every version is parsed up front, so a single invalid version aborts the
    /// batch before any manifest is touched.
    pub fn plan<'m, I>(
        &self,
        snapshot: &WorkspaceSnapshot,
        modules: I,
        kind: BumpKind,
    ) -> Result<Vec<VersionBump>>
    where
        I: IntoIterator<Item = &'m ModuleName>,
    {
        let bumps = modules
            .into_iter()
            .map(|module| {
                let document = snapshot
                    .manifest(module)
                    .ok_or_else(|| ManifestError::UnknownModule(module.clone()))?;
                self.plan_one(module, document, kind)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(count = bumps.len(), kind = %kind, "version bumps planned");
        Ok(bumps)
    }

    /// Write planned bumps, one manifest at a time.
    ///
    /// Each write is atomic, the batch as a whole is not.
    pub fn apply(&self, snapshot: &WorkspaceSnapshot, bumps: &[VersionBump]) -> Result<()> {
        for bump in bumps {
            let mut document = snapshot
                .manifest(&bump.module)
                .cloned()
                .ok_or_else(|| ManifestError::UnknownModule(bump.module.clone()))?;
            self.write(bump, &mut document)?;
        }

        info!(count = bumps.len(), "version bumps applied");
        Ok(())
    }

    fn plan_one(
        &self,
        module: &str,
        document: &ManifestDocument,
        kind: BumpKind,
    ) -> Result<VersionBump> {
        let current = document
            .version()
            .ok_or_else(|| ManifestError::MissingVersion(module.to_string()))?;
        let next = self.strategy.next_version(current, kind)?;

        Ok(VersionBump {
            module: module.to_string(),
            current_version: current.to_string(),
            new_version: next,
            kind,
        })
    }

    fn write(&self, bump: &VersionBump, document: &mut ManifestDocument) -> Result<()> {
        document.set_version(&bump.new_version);
        self.store.save(&bump.module, document)?;
        debug!(
            module = %bump.module,
            from = %bump.current_version,
            to = %bump.new_version,
            "version bumped"
        );
        Ok(())
    }
}

/// Modules from `modules` whose version is the same in `previous` and `current`.
///
/// A module missing from both maps counts as not bumped.
pub fn find_unbumped(
    previous: &BTreeMap<ModuleName, String>,
    current: &BTreeMap<ModuleName, String>,
    modules: &[ModuleName],
) -> Vec<ModuleName> {
    modules
        .iter()
        .filter(|module| previous.get(*module) == current.get(*module))
        .cloned()
        .collect()
}
