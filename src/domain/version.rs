use crate::error::{ConventionError, Result};
use std::fmt;

/// Semantic version representation
///
/// Field order matters: the derived ordering compares major, then minor,
/// then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// The version of a repository with no version tags yet
    pub const INITIAL: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a tag name with the given prefix
    /// (e.g., "v1.2.3" with prefix "v" -> Version(1,2,3)).
    ///
    /// The remainder after the prefix must be a strict `MAJOR.MINOR.PATCH`
    /// triple: integers without leading zeros, no pre-release or build
    /// suffix.
    pub fn parse_tag(name: &str, prefix: &str) -> Result<Self> {
        let stripped = name
            .strip_prefix(prefix)
            .ok_or_else(|| ConventionError::MissingPrefix {
                name: name.to_string(),
                prefix: prefix.to_string(),
            })?;

        let parsed = semver::Version::parse(stripped).map_err(|_| ConventionError::NotSemver {
            name: name.to_string(),
        })?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ConventionError::NotSemver {
                name: name.to_string(),
            });
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Next major version: increments major, zeroes minor and patch
    pub fn next_major(&self) -> Self {
        Version {
            major: self.major + 1,
            minor: 0,
            patch: 0,
        }
    }

    /// Next minor version: increments minor, zeroes patch
    pub fn next_minor(&self) -> Self {
        Version {
            major: self.major,
            minor: self.minor + 1,
            patch: 0,
        }
    }

    /// Next patch version: increments patch
    pub fn next_patch(&self) -> Self {
        Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch + 1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let v = Version::parse_tag("v1.2.3", "v").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_tag_custom_prefix() {
        let v = Version::parse_tag("release-0.4.0", "release-").unwrap();
        assert_eq!(v, Version::new(0, 4, 0));
    }

    #[test]
    fn test_parse_tag_missing_prefix() {
        let err = Version::parse_tag("1.2.3", "v").unwrap_err();
        assert!(matches!(err, ConventionError::MissingPrefix { .. }));
    }

    #[test]
    fn test_parse_tag_not_semver() {
        for name in ["vnext", "v1.2", "v1.2.3.4", "v01.2.3", "v1.2.3-rc.1"] {
            let err = Version::parse_tag(name, "v").unwrap_err();
            assert!(
                matches!(err, ConventionError::NotSemver { .. }),
                "expected NotSemver for {}",
                name
            );
        }
    }

    #[test]
    fn test_parse_render_round_trip() {
        let v = Version::new(10, 0, 7);
        let reparsed = Version::parse_tag(&format!("v{}", v), "v").unwrap();
        assert_eq!(reparsed, v);
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(2, 0, 0) > Version::new(1, 9, 9));
        assert!(Version::new(1, 1, 0) > Version::new(1, 0, 9));
        assert!(Version::new(1, 0, 1) > Version::new(1, 0, 0));
        assert_eq!(
            [
                Version::new(1, 0, 0),
                Version::new(2, 0, 0),
                Version::new(0, 9, 0)
            ]
            .iter()
            .max(),
            Some(&Version::new(2, 0, 0))
        );
    }

    #[test]
    fn test_next_major() {
        assert_eq!(Version::new(1, 2, 3).next_major(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_next_minor() {
        assert_eq!(Version::new(1, 2, 3).next_minor(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_next_patch() {
        assert_eq!(Version::new(1, 2, 3).next_patch(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::INITIAL.to_string(), "0.0.0");
    }
}
