//! Repository fixtures shared by the command tests

use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use crate::cli::Cli;

fn write_module(root: &Path, name: &str, version: &str, imports: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(
        dir.join("substreams.yaml"),
        format!("package:\n  name: {}\n  version: {}\n{}", name, version, imports),
    )
    .unwrap();
}

/// `core`, `derived` importing `core`, and an unrelated `other`
pub(crate) fn repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_module(temp.path(), "core", "v1.2.3", "");
    write_module(
        temp.path(),
        "derived",
        "v0.4.0",
        "imports:\n  core: ../core/substreams.yaml\n",
    );
    write_module(temp.path(), "other", "v2.0.0", "");
    temp
}

/// Parse a command line run against `temp`
pub(crate) fn cli(temp: &TempDir, args: &[&str]) -> Cli {
    let root = temp.path().to_str().unwrap();
    let mut argv = vec!["substreams-versions", "-C", root];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

/// `package.version` as written on disk
pub(crate) fn version_of(root: &Path, name: &str) -> String {
    let content = std::fs::read_to_string(root.join(name).join("substreams.yaml")).unwrap();
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("version: "))
        .unwrap()
        .to_string()
}
