//! Mapping filesystem paths to the module that owns them

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::manifest::ManifestStore;
use crate::types::ModuleName;

/// Resolves paths to module names.
///
/// A module is a top-level directory of the repository root that contains a
/// manifest file. Any path inside it, absolute or relative to the root, belongs
/// to that module.
#[derive(Debug, Clone)]
pub struct ModuleLocator {
    root: PathBuf,
    manifest_file: String,
}

impl ModuleLocator {
    /// Create a locator for the repository at `root`
    pub fn new(root: impl AsRef<Path>, manifest_file: impl Into<String>) -> Self {
        Self {
            root: normalize(root.as_ref()),
            manifest_file: manifest_file.into(),
        }
    }

    /// Create a locator sharing the store's root and manifest file name
    pub fn for_store(store: &ManifestStore) -> Self {
        Self::new(store.root(), store.file_name())
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalize `path` to a path relative to the repository root.
    ///
    /// `.` and `..` are resolved lexically. Returns `None` for paths that end
    /// up outside the root.
    pub fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        let absolute = if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.root.join(path))
        };

        absolute.strip_prefix(&self.root).ok().map(Path::to_path_buf)
    }

    /// First segment of the root-relative path: the module name `path` would
    /// belong to, without checking that the module exists
    pub fn candidate(&self, path: &Path) -> Option<ModuleName> {
        let relative = self.relative_path(path)?;
        match relative.components().next()? {
            Component::Normal(segment) => segment.to_str().map(str::to_string),
            _ => None,
        }
    }

    /// Name of the module owning `path`, if its manifest exists on disk
    pub fn resolve_module(&self, path: &Path) -> Option<ModuleName> {
        let candidate = self.candidate(path)?;
        if self.manifest_exists(&candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Whether `path` belongs to a module
    pub fn is_module(&self, path: &Path) -> bool {
        self.resolve_module(path).is_some()
    }

    /// Every top-level entry that carries a manifest, symlinked directories
    /// included
    pub fn list_all_modules(&self) -> Result<BTreeSet<ModuleName>> {
        let mut modules = BTreeSet::new();

        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            if self.manifest_exists(&name) {
                modules.insert(name);
            }
        }

        debug!(root = %self.root.display(), count = modules.len(), "listed modules");
        Ok(modules)
    }

    fn manifest_exists(&self, module: &str) -> bool {
        self.root.join(module).join(&self.manifest_file).is_file()
    }
}

/// Lexically resolve `.` and `..` components.
///
/// `..` at the filesystem root stays at the root; leading `..` in a relative
/// path is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}
