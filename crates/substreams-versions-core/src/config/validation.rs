//! Configuration validation

use std::path::{Component, Path};

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_manifest(config)?;
    validate_changes(config)?;
    validate_shared_libraries(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_manifest(config: &Config) -> Result<()> {
    if !is_single_segment(&config.manifest.file_name) {
        return Err(ConfigError::InvalidValue {
            field: "manifest.file_name".to_string(),
            message: "must be a plain file name".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changes(config: &Config) -> Result<()> {
    for pattern in &config.changes.exclude {
        if let Err(e) = glob::Pattern::new(pattern) {
            return Err(ConfigError::InvalidValue {
                field: "changes.exclude".to_string(),
                message: format!("invalid glob '{}': {}", pattern, e),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_shared_libraries(config: &Config) -> Result<()> {
    for (library, dependants) in &config.shared_libraries {
        if !is_single_segment(library) {
            return Err(ConfigError::InvalidValue {
                field: "shared_libraries".to_string(),
                message: format!("'{}' must be a top-level directory name", library),
            }
            .into());
        }

        if let Some(bad) = dependants.iter().find(|d| !is_single_segment(d)) {
            return Err(ConfigError::InvalidValue {
                field: format!("shared_libraries.{}", library),
                message: format!("'{}' is not a module name", bad),
            }
            .into());
        }
    }

    Ok(())
}

/// True when `name` is exactly one normal path component
fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
