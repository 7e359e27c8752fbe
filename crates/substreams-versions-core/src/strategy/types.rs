//! Version strategy types

use serde::{Deserialize, Serialize};

/// Version components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComponents {
    /// Major version
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
    /// Pre-release identifier
    pub prerelease: Option<String>,
    /// Build metadata
    pub build: Option<String>,
}

impl VersionComponents {
    /// Create new version components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Set prerelease
    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = Some(prerelease.into());
        self
    }

    /// Convert to string representation, without any prefix
    pub fn to_version_string(&self) -> String {
        let mut v = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            v.push('-');
            v.push_str(pre);
        }

        if let Some(build) = &self.build {
            v.push('+');
            v.push_str(build);
        }

        v
    }
}

impl From<semver::Version> for VersionComponents {
    fn from(version: semver::Version) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: if version.pre.is_empty() {
                None
            } else {
                Some(version.pre.to_string())
            },
            build: if version.build.is_empty() {
                None
            } else {
                Some(version.build.to_string())
            },
        }
    }
}

impl std::fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_version_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_components() {
        let v = VersionComponents::new(1, 2, 3);
        assert_eq!(v.to_version_string(), "1.2.3");

        let v = v.with_prerelease("alpha.1");
        assert_eq!(v.to_version_string(), "1.2.3-alpha.1");
    }

    #[test]
    fn test_from_semver() {
        let v: VersionComponents = semver::Version::parse("2.0.0-beta.1+build.7").unwrap().into();
        assert_eq!(v.major, 2);
        assert_eq!(v.prerelease.as_deref(), Some("beta.1"));
        assert_eq!(v.build.as_deref(), Some("build.7"));
    }
}
