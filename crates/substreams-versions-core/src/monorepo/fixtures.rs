//! Manifest fixtures shared by the monorepo tests

use std::path::Path;

use crate::manifest::ManifestDocument;
use crate::types::ModuleName;

use super::locator::ModuleLocator;
use super::snapshot::WorkspaceSnapshot;

/// A module at `v1.0.0` with the given `(alias, path)` imports
pub(crate) fn module(name: &str, imports: &[(&str, &str)]) -> (ModuleName, ManifestDocument) {
    let mut content = format!("package:\n  name: {}\n  version: v1.0.0\n", name);
    if !imports.is_empty() {
        content.push_str("imports:\n");
        for (alias, path) in imports {
            content.push_str(&format!("  {}: \"{}\"\n", alias, path));
        }
    }

    let doc = ManifestDocument::parse(&content, Path::new("substreams.yaml"))
        .expect("fixture manifest parses");
    (name.to_string(), doc)
}

/// Snapshot built from `module` fixtures
pub(crate) fn snapshot<const N: usize>(
    modules: [(ModuleName, ManifestDocument); N],
) -> WorkspaceSnapshot {
    WorkspaceSnapshot::from_manifests(modules)
}

/// Locator for a repository rooted at `/repo`
pub(crate) fn locator() -> ModuleLocator {
    ModuleLocator::new("/repo", "substreams.yaml")
}
