//! In-memory substreams manifest

use std::path::Path;

use serde_yaml::{Mapping, Value};
use url::Url;

use crate::error::{ManifestError, Result};

const PACKAGE_KEY: &str = "package";
const VERSION_KEY: &str = "version";
const NAME_KEY: &str = "name";
const IMPORTS_KEY: &str = "imports";

/// A parsed manifest.
///
/// The whole YAML document is kept so that saving it back never drops fields
/// this crate does not interpret. Only `package.version`, `package.name` and
/// `imports` have typed accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    root: Value,
}

/// A single entry of the `imports` mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Import<'a> {
    /// Import alias
    pub alias: &'a str,
    /// Relative path or remote URL
    pub path: &'a str,
}

impl Import<'_> {
    /// Whether the path points at a remote location (carries a URL scheme).
    ///
    /// Single-letter schemes are treated as Windows drive letters, not URLs.
    pub fn is_remote(&self) -> bool {
        Url::parse(self.path)
            .map(|url| url.scheme().len() > 1)
            .unwrap_or(false)
    }
}

impl ManifestDocument {
    /// Parse manifest content read from `path`
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |message: String| ManifestError::ParseError {
            path: path.to_path_buf(),
            message,
        };

        let root: Value = serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        if !root.is_mapping() {
            return Err(parse_error("top-level value is not a mapping".to_string()).into());
        }

        match root.get(IMPORTS_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(imports)) => {
                for (alias, target) in imports {
                    if alias.as_str().is_none() || target.as_str().is_none() {
                        return Err(parse_error(format!(
                            "import {:?} must map a string alias to a string path",
                            alias
                        ))
                        .into());
                    }
                }
            }
            Some(_) => return Err(parse_error("imports is not a mapping".to_string()).into()),
        }

        Ok(Self { root })
    }

    /// Serialize the full document back to YAML
    pub fn to_yaml_string(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.root)
    }

    /// `package.version`, if present and a string
    pub fn version(&self) -> Option<&str> {
        self.root.get(PACKAGE_KEY)?.get(VERSION_KEY)?.as_str()
    }

    /// `package.name`, if present and a string
    pub fn package_name(&self) -> Option<&str> {
        self.root.get(PACKAGE_KEY)?.get(NAME_KEY)?.as_str()
    }

    /// Overwrite `package.version`, keeping every other field intact
    pub fn set_version(&mut self, version: &str) {
        let Some(root) = self.root.as_mapping_mut() else {
            return;
        };

        let package = root
            .entry(Value::from(PACKAGE_KEY))
            .or_insert_with(|| Value::Mapping(Mapping::new()));

        if !package.is_mapping() {
            *package = Value::Mapping(Mapping::new());
        }

        if let Some(package) = package.as_mapping_mut() {
            package.insert(Value::from(VERSION_KEY), Value::from(version));
        }
    }

    /// Entries of the `imports` mapping, in document order
    pub fn imports(&self) -> impl Iterator<Item = Import<'_>> {
        self.root
            .get(IMPORTS_KEY)
            .and_then(Value::as_mapping)
            .into_iter()
            .flat_map(|imports| imports.iter())
            .filter_map(|(alias, path)| {
                Some(Import {
                    alias: alias.as_str()?,
                    path: path.as_str()?,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"specVersion: v0.1.0
package:
  name: uniswap_v3
  version: v0.1.2
  doc: Uniswap v3 substream
imports:
  eth: https://github.com/streamingfast/sf-ethereum/releases/download/v0.10.2/ethereum-v0.10.4.spkg
  prices: ../erc20-price/substreams.yaml
protobuf:
  files:
    - uniswap.proto
modules:
  - name: map_pools
    kind: map
"#;

    fn parse(content: &str) -> Result<ManifestDocument> {
        ManifestDocument::parse(content, Path::new("uniswap-v3/substreams.yaml"))
    }

    #[test]
    fn test_accessors() {
        let doc = parse(MANIFEST).unwrap();
        assert_eq!(doc.version(), Some("v0.1.2"));
        assert_eq!(doc.package_name(), Some("uniswap_v3"));

        let imports: Vec<_> = doc.imports().collect();
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].alias, "eth");
        assert!(imports[0].is_remote());
        assert_eq!(imports[1].path, "../erc20-price/substreams.yaml");
        assert!(!imports[1].is_remote());
    }

    #[test]
    fn test_set_version_preserves_unknown_fields() {
        let mut doc = parse(MANIFEST).unwrap();
        doc.set_version("v0.2.0");

        let reparsed = parse(&doc.to_yaml_string().unwrap()).unwrap();
        assert_eq!(reparsed.version(), Some("v0.2.0"));
        assert_eq!(reparsed.package_name(), Some("uniswap_v3"));
        assert_eq!(reparsed.root.get("specVersion"), doc.root.get("specVersion"));
        assert_eq!(reparsed.root.get("modules"), doc.root.get("modules"));
        assert_eq!(
            reparsed.root["package"]["doc"].as_str(),
            Some("Uniswap v3 substream")
        );
    }

    #[test]
    fn test_round_trip_is_semantically_identical() {
        let doc = parse(MANIFEST).unwrap();
        let reparsed = parse(&doc.to_yaml_string().unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_missing_version_and_imports() {
        let doc = parse("package:\n  name: bare\n").unwrap();
        assert_eq!(doc.version(), None);
        assert_eq!(doc.imports().count(), 0);
    }

    #[test]
    fn test_non_string_version_is_unreadable() {
        let doc = parse("package:\n  version: 1.0\n").unwrap();
        assert_eq!(doc.version(), None);
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(parse("package: [unclosed").is_err());
        assert!(parse("- just\n- a list\n").is_err());
        assert!(parse("imports:\n  - a\n").is_err());
        assert!(parse("imports:\n  eth:\n    nested: true\n").is_err());
    }

    #[test]
    fn test_remote_detection() {
        let import = |path| Import { alias: "x", path };
        assert!(import("https://example.com/a.spkg").is_remote());
        assert!(import("http://example.com/a.spkg").is_remote());
        assert!(!import("../common/substreams.yaml").is_remote());
        assert!(!import("./local.spkg").is_remote());
        assert!(!import("C:/repo/core/substreams.yaml").is_remote());
    }
}
