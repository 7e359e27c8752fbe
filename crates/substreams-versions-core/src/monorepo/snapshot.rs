//! Point-in-time view of every module manifest in the repository

use std::collections::BTreeMap;

use tracing::info;

use crate::error::{ManifestError, Result};
use crate::manifest::{ManifestDocument, ManifestStore};
use crate::types::ModuleName;

use super::locator::ModuleLocator;

/// All module manifests, read once per invocation.
///
/// Graph construction and version planning work from the same snapshot so
/// that no write can change the graph while it is being walked.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    modules: BTreeMap<ModuleName, ManifestDocument>,
}

impl WorkspaceSnapshot {
    /// Read every module manifest under the locator's root
    pub fn load(store: &ManifestStore, locator: &ModuleLocator) -> Result<Self> {
        let mut modules = BTreeMap::new();
        for name in locator.list_all_modules()? {
            let document = store.load(&name)?;
            modules.insert(name, document);
        }

        info!(modules = modules.len(), "workspace snapshot loaded");
        Ok(Self { modules })
    }

    /// Build a snapshot from already parsed manifests
    pub fn from_manifests<I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = (ModuleName, ManifestDocument)>,
    {
        Self {
            modules: manifests.into_iter().collect(),
        }
    }

    /// Whether `name` is a module of this workspace
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Manifest of a module
    pub fn manifest(&self, name: &str) -> Option<&ManifestDocument> {
        self.modules.get(name)
    }

    /// Module names in sorted order
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Modules and their manifests in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestDocument)> {
        self.modules.iter().map(|(name, doc)| (name.as_str(), doc))
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the workspace has no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Current `package.version` of every module
    pub fn versions(&self) -> Result<BTreeMap<ModuleName, String>> {
        self.modules
            .iter()
            .map(|(name, doc)| {
                doc.version()
                    .map(|v| (name.clone(), v.to_string()))
                    .ok_or_else(|| ManifestError::MissingVersion(name.clone()).into())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn doc(content: &str) -> ManifestDocument {
        ManifestDocument::parse(content, Path::new("substreams.yaml")).unwrap()
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        for (module, version) in [("ens", "v0.1.0"), ("erc721", "v1.4.2")] {
            let dir = temp.path().join(module);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(
                dir.join("substreams.yaml"),
                format!("package:\n  name: {}\n  version: {}\n", module, version),
            )
            .unwrap();
        }
        std::fs::create_dir_all(temp.path().join("scripts")).unwrap();

        let store = ManifestStore::new(temp.path(), "substreams.yaml");
        let locator = ModuleLocator::for_store(&store);
        let snapshot = WorkspaceSnapshot::load(&store, &locator).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("ens"));
        assert!(!snapshot.contains("scripts"));
        assert_eq!(
            snapshot.module_names().collect::<Vec<_>>(),
            vec!["ens", "erc721"]
        );
    }

    #[test]
    fn test_load_fails_on_malformed_manifest() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("substreams.yaml"), "package: [\n").unwrap();

        let store = ManifestStore::new(temp.path(), "substreams.yaml");
        let locator = ModuleLocator::for_store(&store);
        assert!(WorkspaceSnapshot::load(&store, &locator).is_err());
    }

    #[test]
    fn test_versions() {
        let snapshot = WorkspaceSnapshot::from_manifests([
            ("a".to_string(), doc("package:\n  version: v0.1.0\n")),
            ("b".to_string(), doc("package:\n  version: v2.0.0\n")),
        ]);

        let versions = snapshot.versions().unwrap();
        assert_eq!(versions["a"], "v0.1.0");
        assert_eq!(versions["b"], "v2.0.0");
    }

    #[test]
    fn test_versions_missing_field() {
        let snapshot =
            WorkspaceSnapshot::from_manifests([("a".to_string(), doc("package:\n  name: a\n"))]);
        assert!(snapshot.versions().is_err());
    }
}
