//! Exit codes for the CLI

use substreams_versions_core::SubstreamsError;

use crate::cli::commands::UnbumpedModules;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Validation error
pub const VALIDATION_ERROR: u8 = 5;

/// Manifest error
pub const MANIFEST_ERROR: u8 = 6;

/// Exit code for the first recognised error in the chain
pub fn for_error(error: &anyhow::Error) -> u8 {
    for cause in error.chain() {
        if cause.downcast_ref::<UnbumpedModules>().is_some() {
            return VALIDATION_ERROR;
        }

        if let Some(e) = cause.downcast_ref::<SubstreamsError>() {
            return match e {
                SubstreamsError::Config(_) => CONFIG_ERROR,
                SubstreamsError::Git(_) => GIT_ERROR,
                SubstreamsError::Version(_) => VERSION_ERROR,
                SubstreamsError::Manifest(_) => MANIFEST_ERROR,
                _ => ERROR,
            };
        }
    }

    ERROR
}
