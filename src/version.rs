//! Versions of schema history files

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Result, SchemaError};

/// Semantic version of one schema in a chronology
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Semantic version (e.g., "1.2.3")
    pub version: Version,
}

impl SchemaVersion {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    /// Create from a version string
    pub fn parse(version_str: &str) -> std::result::Result<Self, semver::Error> {
        // Strip leading 'v' if present
        let version_str = version_str.strip_prefix('v').unwrap_or(version_str);
        let version = Version::parse(version_str)?;
        Ok(Self::new(version))
    }

    /// Parse the version from a file name such as `v1.2.0.avsc`
    pub fn from_path(path: &Path, extension: &str) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SchemaError::InvalidFormat(format!("Not a file name: {}", path.display())))?;
        let stem = file_name
            .strip_suffix(extension)
            .and_then(|stem| stem.strip_suffix('.'))
            .unwrap_or(file_name);
        Ok(Self::parse(stem)?)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = SchemaVersion::parse("1.2.3").unwrap();
        assert_eq!(v.version, semver::Version::new(1, 2, 3));
        assert_eq!(v.to_string(), "v1.2.3");
    }

    #[test]
    fn test_version_with_v_prefix() {
        let v = SchemaVersion::parse("v1.2.3").unwrap();
        assert_eq!(v, SchemaVersion::parse("1.2.3").unwrap());
    }

    #[test]
    fn test_version_from_path() {
        let v = SchemaVersion::from_path(Path::new("history/v1.10.0.avsc"), "avsc").unwrap();
        assert_eq!(v.to_string(), "v1.10.0");

        assert!(matches!(
            SchemaVersion::from_path(Path::new("history/latest.avsc"), "avsc"),
            Err(SchemaError::Semver(_))
        ));
    }

    #[test]
    fn test_versions_order_numerically() {
        let mut versions: Vec<_> = ["1.10.0", "v1.2.0", "0.9.1"]
            .iter()
            .map(|v| SchemaVersion::parse(v).unwrap())
            .collect();
        versions.sort();
        let ordered: Vec<_> = versions.iter().map(|v| v.version.to_string()).collect();
        assert_eq!(ordered, vec!["0.9.1", "1.2.0", "1.10.0"]);
    }
}
