//! SemVer version strategy

use crate::config::DEFAULT_VERSION_PREFIX;
use crate::error::{Result, VersionError};
use crate::types::BumpKind;

use super::traits::VersionStrategy;
use super::types::VersionComponents;

/// Semantic Versioning strategy for manifest versions such as `v1.2.3`.
///
/// Parsing accepts the version with or without the prefix, the rest must be a
/// strict SemVer 2.0.0 version. Formatting always writes the prefix.
pub struct SemVerStrategy {
    prefix: String,
}

impl SemVerStrategy {
    /// Create a new SemVer strategy using the `v` prefix
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_VERSION_PREFIX)
    }

    /// Create a strategy writing `prefix` in front of every version
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for SemVerStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStrategy for SemVerStrategy {
    fn parse(&self, version: &str) -> Result<VersionComponents> {
        let bare = if self.prefix.is_empty() {
            version
        } else {
            version.strip_prefix(self.prefix.as_str()).unwrap_or(version)
        };

        let parsed = semver::Version::parse(bare).map_err(|e| VersionError::InvalidFormat {
            version: version.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parsed.into())
    }

    fn format(&self, components: &VersionComponents) -> String {
        format!("{}{}", self.prefix, components.to_version_string())
    }

    fn bump(&self, current: &VersionComponents, kind: BumpKind) -> Result<VersionComponents> {
        let mut result = current.clone();
        let increment = |component: u64| {
            component.checked_add(1).ok_or_else(|| VersionError::Overflow {
                version: self.format(current),
                kind: kind.to_string(),
            })
        };

        match kind {
            BumpKind::Major => {
                // 1.0.0-rc.1 releases as 1.0.0
                if !(result.prerelease.is_some() && result.minor == 0 && result.patch == 0) {
                    result.major = increment(result.major)?;
                }
                result.minor = 0;
                result.patch = 0;
            }
            BumpKind::Minor => {
                if !(result.prerelease.is_some() && result.patch == 0) {
                    result.minor = increment(result.minor)?;
                }
                result.patch = 0;
            }
            BumpKind::Patch => {
                if result.prerelease.is_none() {
                    result.patch = increment(result.patch)?;
                }
            }
        }

        result.prerelease = None;
        result.build = None;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        let strategy = SemVerStrategy::new();
        let v = strategy.parse("v1.2.3").unwrap();

        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert!(v.prerelease.is_none());
    }

    #[test]
    fn test_parse_without_prefix() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.parse("0.4.1").unwrap(), VersionComponents::new(0, 4, 1));
    }

    #[test]
    fn test_parse_rejects_loose_versions() {
        let strategy = SemVerStrategy::new();
        for bad in ["v1.2", "1", "v01.2.3", "version1.2.3", "", "vv1.2.3"] {
            let err = strategy.parse(bad).unwrap_err();
            assert!(
                matches!(
                    err,
                    crate::error::SubstreamsError::Version(VersionError::InvalidFormat { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_next_version() {
        let strategy = SemVerStrategy::new();
        assert_eq!(strategy.next_version("v1.2.3", BumpKind::Major).unwrap(), "v2.0.0");
        assert_eq!(strategy.next_version("v1.2.3", BumpKind::Minor).unwrap(), "v1.3.0");
        assert_eq!(strategy.next_version("v1.2.3", BumpKind::Patch).unwrap(), "v1.2.4");
        assert_eq!(strategy.next_version("0.1.0", BumpKind::Patch).unwrap(), "v0.1.1");
    }

    #[test]
    fn test_bump_releases_prerelease() {
        let strategy = SemVerStrategy::new();

        let pre = VersionComponents::new(1, 2, 3).with_prerelease("alpha.1");
        assert_eq!(strategy.bump(&pre, BumpKind::Patch).unwrap(), VersionComponents::new(1, 2, 3));
        assert_eq!(strategy.bump(&pre, BumpKind::Minor).unwrap(), VersionComponents::new(1, 3, 0));

        let rc = VersionComponents::new(2, 0, 0).with_prerelease("rc.1");
        assert_eq!(strategy.bump(&rc, BumpKind::Major).unwrap(), VersionComponents::new(2, 0, 0));

        let minor_pre = VersionComponents::new(1, 3, 0).with_prerelease("beta");
        assert_eq!(
            strategy.bump(&minor_pre, BumpKind::Minor).unwrap(),
            VersionComponents::new(1, 3, 0)
        );
    }

    #[test]
    fn test_bump_clears_build_metadata() {
        let strategy = SemVerStrategy::new();
        assert_eq!(
            strategy.next_version("v1.2.3+sha.abc", BumpKind::Patch).unwrap(),
            "v1.2.4"
        );
    }

    #[test]
    fn test_custom_prefix() {
        let strategy = SemVerStrategy::with_prefix("");
        assert_eq!(strategy.next_version("1.2.3", BumpKind::Minor).unwrap(), "1.3.0");
        assert!(strategy.parse("v1.2.3").is_err());
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let strategy = SemVerStrategy::new();
        let max = u64::MAX;

        for (version, kind) in [
            (format!("v{}.0.0", max), BumpKind::Major),
            (format!("v1.{}.0", max), BumpKind::Minor),
            (format!("v1.2.{}", max), BumpKind::Patch),
        ] {
            let err = strategy.next_version(&version, kind).unwrap_err();
            assert!(
                matches!(
                    err,
                    crate::error::SubstreamsError::Version(VersionError::Overflow { .. })
                ),
                "{} {} should overflow",
                version,
                kind
            );
        }

        // A prerelease at the limit releases without incrementing
        assert_eq!(
            strategy.next_version(&format!("v{}.0.0-rc.1", max), BumpKind::Major).unwrap(),
            format!("v{}.0.0", max)
        );
    }
}
