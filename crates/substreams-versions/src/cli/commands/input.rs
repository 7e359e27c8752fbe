//! Parsing of changed-file and JSON arguments

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;

use substreams_versions_core::monorepo::changed_files_since;
use substreams_versions_core::{BumpKind, SubstreamsError};

/// Changed files from positional arguments.
///
/// A single argument holding a JSON array of strings is decoded; otherwise
/// every argument is one path. Empty entries are dropped.
pub fn parse_changed_files(args: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let entries: Vec<String> = match args {
        [single] if single.trim_start().starts_with('[') => parse_json(single, "changed files")?,
        _ => args.to_vec(),
    };

    Ok(entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Changed files from arguments, or from git when `since` is set
pub fn collect_changed_files(
    args: &[String],
    since: Option<&str>,
    root: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    match since {
        Some(_) if !args.is_empty() => {
            bail!("changed files cannot be given together with --since")
        }
        Some(reference) => Ok(changed_files_since(root, reference)?),
        None => parse_changed_files(args),
    }
}

/// Split the bump kind off the arguments.
///
/// With `--kind` every argument is a changed file; otherwise the last argument
/// is the kind.
pub fn split_bump_kind<'a>(
    args: &'a [String],
    kind: Option<&str>,
) -> anyhow::Result<(&'a [String], BumpKind)> {
    if let Some(kind) = kind {
        return Ok((args, parse_kind(kind)?));
    }

    match args.split_last() {
        Some((last, files)) => Ok((files, parse_kind(last)?)),
        None => bail!("missing bump kind: expected major, minor, or patch"),
    }
}

fn parse_kind(raw: &str) -> Result<BumpKind, SubstreamsError> {
    Ok(raw.parse::<BumpKind>()?)
}

/// Decode a JSON argument
pub fn parse_json<T: DeserializeOwned>(raw: &str, what: &str) -> anyhow::Result<T> {
    serde_json::from_str(raw).with_context(|| format!("invalid JSON for {}", what))
}
