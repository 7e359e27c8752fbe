//! Dependency graph between substream modules

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::types::ModuleName;

use super::locator::ModuleLocator;
use super::snapshot::WorkspaceSnapshot;

/// A node in the dependency graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Module name
    pub name: ModuleName,
    /// Modules this module imports
    pub dependencies: BTreeSet<ModuleName>,
    /// Modules that import this module
    pub dependents: BTreeSet<ModuleName>,
}

/// Import edges between the modules of one workspace snapshot
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<ModuleName, ModuleNode>,
}

impl DependencyGraph {
    /// Build the graph from a snapshot.
    ///
    /// Each non-remote import of module `m` is resolved as `<root>/m/<path>`,
    /// with a leading `/` in `path` appended rather than replacing the base.
    /// An edge exists when that lands inside another module of the snapshot.
    /// Self-imports produce no edge.
    pub fn build(snapshot: &WorkspaceSnapshot, locator: &ModuleLocator) -> Self {
        let mut nodes: BTreeMap<ModuleName, ModuleNode> = snapshot
            .module_names()
            .map(|name| {
                (
                    name.to_string(),
                    ModuleNode {
                        name: name.to_string(),
                        ..Default::default()
                    },
                )
            })
            .collect();

        let mut edges = Vec::new();
        for (module, manifest) in snapshot.iter() {
            for import in manifest.imports() {
                if import.is_remote() {
                    trace!(module, alias = import.alias, "skipping remote import");
                    continue;
                }

                let target = locator.root().join(module).join(relative_import(import.path));
                let Some(dependency) = locator.candidate(&target) else {
                    debug!(module, path = import.path, "import resolves outside the repository");
                    continue;
                };

                if dependency == module || !snapshot.contains(&dependency) {
                    continue;
                }

                debug!(dependant = module, dependency = %dependency, alias = import.alias, "import edge");
                edges.push((module.to_string(), dependency));
            }
        }

        for (dependant, dependency) in edges {
            if let Some(node) = nodes.get_mut(&dependant) {
                node.dependencies.insert(dependency.clone());
            }
            if let Some(node) = nodes.get_mut(&dependency) {
                node.dependents.insert(dependant);
            }
        }

        Self { nodes }
    }

    /// Modules that directly import `name`
    pub fn direct_dependants(&self, name: &str) -> BTreeSet<ModuleName> {
        self.nodes
            .get(name)
            .map(|n| n.dependents.clone())
            .unwrap_or_default()
    }

    /// Modules that `name` directly imports
    pub fn direct_dependencies(&self, name: &str) -> BTreeSet<ModuleName> {
        self.nodes
            .get(name)
            .map(|n| n.dependencies.clone())
            .unwrap_or_default()
    }

    /// Number of modules in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no modules
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Import path with any root or prefix component dropped
fn relative_import(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}
