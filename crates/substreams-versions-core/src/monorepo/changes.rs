//! Change detection: from changed file paths to directly modified modules

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GitError, Result};
use crate::types::ModuleName;

use super::locator::ModuleLocator;
use super::snapshot::WorkspaceSnapshot;

/// A module that has changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedModule {
    /// Module name
    pub name: ModuleName,
    /// Root-relative files that changed in this module
    pub changed_files: Vec<PathBuf>,
    /// Reason for inclusion in changes
    pub change_reason: ChangeReason,
}

/// Reason why a module is considered changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum ChangeReason {
    /// Direct file changes in the module
    DirectChanges,
    /// A configured shared library the module depends on changed
    SharedLibraryChanged(String),
    /// A module this module imports was impacted
    DependencyChanged(ModuleName),
}

impl std::fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectChanges => write!(f, "direct changes"),
            Self::SharedLibraryChanged(lib) => write!(f, "shared library '{}' changed", lib),
            Self::DependencyChanged(dep) => write!(f, "dependency '{}' changed", dep),
        }
    }
}

/// Maps changed files to the modules they directly modify
pub struct ChangeDetector<'a> {
    locator: &'a ModuleLocator,
    filter: ChangeFilter,
    shared_libraries: BTreeMap<String, Vec<ModuleName>>,
}

impl<'a> ChangeDetector<'a> {
    /// Create a detector with no exclusions and no shared libraries
    pub fn new(locator: &'a ModuleLocator) -> Self {
        Self {
            locator,
            filter: ChangeFilter::default(),
            shared_libraries: BTreeMap::new(),
        }
    }

    /// Create a detector using the change settings of `config`
    pub fn from_config(locator: &'a ModuleLocator, config: &Config) -> Self {
        Self::new(locator)
            .with_filter(ChangeFilter::new(config.changes.exclude.clone()))
            .with_shared_libraries(config.shared_libraries.clone())
    }

    /// Set the filter applied to changed files
    pub fn with_filter(mut self, filter: ChangeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the shared library to dependants mapping
    pub fn with_shared_libraries(mut self, libraries: BTreeMap<String, Vec<ModuleName>>) -> Self {
        self.shared_libraries = libraries;
        self
    }

    /// Directly modified modules for a list of changed files.
    ///
    /// A file inside a module modifies that module. A file inside a configured
    /// shared library modifies every module listed for it. Anything else is
    /// ignored.
    pub fn detect_changes(
        &self,
        snapshot: &WorkspaceSnapshot,
        changed_files: &[PathBuf],
    ) -> BTreeMap<ModuleName, ChangedModule> {
        debug!(
            modules = snapshot.len(),
            changed_files = changed_files.len(),
            "detecting changed modules"
        );
        let mut changed: BTreeMap<ModuleName, ChangedModule> = BTreeMap::new();

        for file in changed_files {
            let Some(relative) = self.locator.relative_path(file) else {
                warn!(file = %file.display(), "changed file is outside the repository, ignoring");
                continue;
            };

            if self.filter.is_excluded(&relative) {
                debug!(file = %relative.display(), "changed file excluded by filter");
                continue;
            }

            let Some(candidate) = self.locator.candidate(&relative) else {
                debug!(file = %relative.display(), "changed file has no owning directory");
                continue;
            };

            if snapshot.contains(&candidate) {
                record(&mut changed, &candidate, &relative, ChangeReason::DirectChanges);
                continue;
            }

            let Some(dependants) = self.shared_libraries.get(&candidate) else {
                debug!(file = %relative.display(), "changed file does not belong to a module");
                continue;
            };

            for dependant in dependants {
                if !snapshot.contains(dependant) {
                    warn!(library = %candidate, module = %dependant, "shared library dependant is not a module, ignoring");
                    continue;
                }
                record(
                    &mut changed,
                    dependant,
                    &relative,
                    ChangeReason::SharedLibraryChanged(candidate.clone()),
                );
            }
        }

        info!(changed_modules = changed.len(), "change detection complete");
        changed
    }
}

/// Add `file` to `module`'s entry. Direct changes take precedence over a
/// shared library reason.
fn record(
    changed: &mut BTreeMap<ModuleName, ChangedModule>,
    module: &str,
    file: &Path,
    reason: ChangeReason,
) {
    let entry = changed
        .entry(module.to_string())
        .or_insert_with(|| ChangedModule {
            name: module.to_string(),
            changed_files: Vec::new(),
            change_reason: reason.clone(),
        });

    if reason == ChangeReason::DirectChanges {
        entry.change_reason = reason;
    }
    entry.changed_files.push(file.to_path_buf());
}

/// Files changed between `reference` and `HEAD`, relative to `root`
pub fn changed_files_since(root: &Path, reference: &str) -> Result<Vec<PathBuf>> {
    use std::process::Command;

    info!(reference, root = %root.display(), "collecting changed files from git");
    let output = Command::new("git")
        .current_dir(root)
        .args(["diff", "--name-only", reference, "HEAD"])
        .output()
        .map_err(|e| GitError::CommandFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(GitError::DiffFailed {
            reference: reference.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let files: Vec<PathBuf> = stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    debug!(count = files.len(), "git reported changed files");
    Ok(files)
}

/// Glob patterns for changed files that never modify a module
#[derive(Debug, Clone, Default)]
pub struct ChangeFilter {
    exclude: Vec<glob::Pattern>,
}

impl ChangeFilter {
    /// Create a filter from exclude patterns. Invalid patterns are skipped
    /// with a warning.
    pub fn new(patterns: Vec<String>) -> Self {
        let exclude = patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "ignoring invalid exclude pattern");
                    None
                }
            })
            .collect();
        Self { exclude }
    }

    /// Whether a root-relative path is excluded
    pub fn is_excluded(&self, file: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monorepo::fixtures::{locator, module, snapshot};

    fn paths(files: &[&str]) -> Vec<PathBuf> {
        files.iter().map(PathBuf::from).collect()
    }

    fn workspace() -> WorkspaceSnapshot {
        snapshot([
            module("core", &[]),
            module("derived", &[("core", "../core/substreams.yaml")]),
            module("ens", &[]),
        ])
    }

    #[test]
    fn test_detect_direct_changes() {
        let locator = locator();
        let detector = ChangeDetector::new(&locator);

        let changes = detector.detect_changes(
            &workspace(),
            &paths(&["core/src/x.rs", "core/Cargo.toml", "/repo/ens/src/lib.rs"]),
        );

        assert_eq!(changes.len(), 2);
        assert_eq!(changes["core"].changed_files.len(), 2);
        assert_eq!(changes["core"].change_reason, ChangeReason::DirectChanges);
        assert_eq!(
            changes["ens"].changed_files,
            vec![PathBuf::from("ens/src/lib.rs")]
        );
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let locator = locator();
        let detector = ChangeDetector::new(&locator);

        let changes = detector.detect_changes(
            &workspace(),
            &paths(&[
                "README.md",
                "substreams-helper/src/lib.rs",
                "/elsewhere/core/src/x.rs",
                "../core/src/x.rs",
            ]),
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_shared_library_mapping() {
        let locator = locator();
        let mut libraries = BTreeMap::new();
        libraries.insert(
            "substreams-helper".to_string(),
            vec!["ens".to_string(), "ghost".to_string()],
        );
        let detector = ChangeDetector::new(&locator).with_shared_libraries(libraries);

        let changes =
            detector.detect_changes(&workspace(), &paths(&["substreams-helper/src/math.rs"]));

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes["ens"].change_reason,
            ChangeReason::SharedLibraryChanged("substreams-helper".to_string())
        );
    }

    #[test]
    fn test_direct_reason_wins_over_shared_library() {
        let locator = locator();
        let mut libraries = BTreeMap::new();
        libraries.insert("common".to_string(), vec!["ens".to_string()]);
        let detector = ChangeDetector::new(&locator).with_shared_libraries(libraries);

        let changes = detector.detect_changes(
            &workspace(),
            &paths(&["common/src/lib.rs", "ens/src/lib.rs"]),
        );
        assert_eq!(changes["ens"].change_reason, ChangeReason::DirectChanges);
        assert_eq!(changes["ens"].changed_files.len(), 2);
    }

    #[test]
    fn test_filter_excludes_files() {
        let locator = locator();
        let detector = ChangeDetector::new(&locator)
            .with_filter(ChangeFilter::new(vec!["**/*.md".to_string()]));

        let changes = detector.detect_changes(
            &workspace(),
            &paths(&["core/README.md", "derived/src/lib.rs"]),
        );
        assert_eq!(changes.keys().collect::<Vec<_>>(), vec!["derived"]);
    }

    #[test]
    fn test_change_filter() {
        let filter = ChangeFilter::new(vec!["**/*.md".to_string(), "docs/**".to_string()]);

        assert!(filter.is_excluded(Path::new("README.md")));
        assert!(filter.is_excluded(Path::new("core/CHANGELOG.md")));
        assert!(filter.is_excluded(Path::new("docs/index.html")));
        assert!(!filter.is_excluded(Path::new("core/src/lib.rs")));
        assert!(!ChangeFilter::default().is_excluded(Path::new("README.md")));
    }

    #[test]
    fn test_change_reason_display() {
        assert_eq!(ChangeReason::DirectChanges.to_string(), "direct changes");
        assert_eq!(
            ChangeReason::DependencyChanged("core".to_string()).to_string(),
            "dependency 'core' changed"
        );
        assert_eq!(
            ChangeReason::SharedLibraryChanged("common".to_string()).to_string(),
            "shared library 'common' changed"
        );
    }
}
