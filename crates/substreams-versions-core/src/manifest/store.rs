//! Filesystem-backed manifest store

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error};

use crate::error::{ManifestError, Result, SubstreamsError};

use super::document::ManifestDocument;

/// Reads and writes `<root>/<module>/<file_name>` manifests
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
    file_name: String,
}

impl ManifestStore {
    /// Create a store for the repository at `root`
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Manifest file name inside each module directory
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path of a module's manifest
    pub fn manifest_path(&self, module: &str) -> PathBuf {
        self.root.join(module).join(&self.file_name)
    }

    /// Load and parse a module's manifest
    pub fn load(&self, module: &str) -> Result<ManifestDocument> {
        let path = self.manifest_path(module);
        debug!(module, path = %path.display(), "loading manifest");

        let bytes = fs::read(&path).map_err(|e| -> SubstreamsError {
            if e.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound(path.clone()).into()
            } else {
                e.into()
            }
        })?;

        let content = String::from_utf8(bytes).map_err(|e| ManifestError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        ManifestDocument::parse(&content, &path)
    }

    /// Serialize and atomically replace a module's manifest.
    ///
    /// The content goes to a temp file in the module directory which is synced
    /// and then renamed over the manifest, so readers only ever see the old or
    /// the new file.
    pub fn save(&self, module: &str, document: &ManifestDocument) -> Result<()> {
        let path = self.manifest_path(module);
        let content = document
            .to_yaml_string()
            .map_err(|e| write_failed(&path, e))?;

        atomic_write(&path, content.as_bytes()).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to write manifest");
            write_failed(&path, e)
        })?;

        debug!(module, path = %path.display(), bytes = content.len(), "manifest saved");
        Ok(())
    }
}

fn write_failed(path: &Path, reason: impl std::fmt::Display) -> ManifestError {
    ManifestError::WriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let original_perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    if let Some(perms) = original_perms {
        temp_file.as_file().set_permissions(perms)?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
