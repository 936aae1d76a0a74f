//! Go module version comparison
//!
//! Handles version formats:
//! - Semantic version: `v1.2.3`
//! - Prerelease: `v1.2.3-beta.1`
//! - Pseudo-version: `v0.0.0-20210101120000-abcdef123456`
//! - Incompatible major: `v2.0.0+incompatible`

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::LazyLock;

// Pseudo-version forms: vX.0.0-yyyymmddhhmmss-abcdef123456, vX.Y.Z-pre.0.yyyymmddhhmmss-abcdef123456
// and vX.Y.(Z+1)-0.yyyymmddhhmmss-abcdef123456
static PSEUDO_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v\d+\.\d+\.\d+-(?:[\w.]+\.)?(?:0\.)?\d{14}-[a-f0-9]{12}(?:\+incompatible)?$")
        .unwrap()
});

/// Parses a Go version into a semver value
pub fn parse_go_version(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("+incompatible").unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

/// Returns true if the version references a commit rather than a release
pub fn is_pseudo_version(version: &str) -> bool {
    PSEUDO_VERSION_RE.is_match(version.trim())
}

/// Compares two Go versions, `None` if either is not semver
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    Some(parse_go_version(a)?.cmp(&parse_go_version(b)?))
}

/// Returns true if `candidate` is newer than `current`
///
/// Versions that cannot be ordered are considered newer when they differ.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match compare_versions(candidate, current) {
        Some(ordering) => ordering == Ordering::Greater,
        None => candidate.trim() != current.trim(),
    }
}

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Target is a pseudo-version pointing at a commit
    Commit,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        if is_pseudo_version(new) {
            return VersionChangeType::Commit;
        }

        match (parse_go_version(old), parse_go_version(new)) {
            (Some(old), Some(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Commit => "commit",
            VersionChangeType::Unknown => "?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_version() {
        assert_eq!(parse_go_version("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(
            parse_go_version("v2.0.0+incompatible"),
            Some(Version::new(2, 0, 0))
        );
        assert!(parse_go_version("v0.0.0-20210101120000-abcdef123456").is_some());
        assert!(parse_go_version("latest").is_none());
        assert!(parse_go_version("").is_none());
    }

    #[test]
    fn test_is_pseudo_version() {
        assert!(is_pseudo_version("v0.0.0-20210101120000-abcdef123456"));
        assert!(is_pseudo_version("v1.2.4-0.20210101120000-abcdef123456"));
        assert!(is_pseudo_version("v1.2.3-pre.0.20210101120000-abcdef123456"));
        assert!(!is_pseudo_version("v1.2.3"));
        assert!(!is_pseudo_version("v1.2.3-beta.1"));
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("v1.2.4", "v1.2.3"));
        assert!(is_newer("v1.10.0", "v1.9.0"));
        assert!(!is_newer("v1.2.3", "v1.2.3"));
        assert!(!is_newer("v1.2.2", "v1.2.3"));
        assert!(is_newer("v1.0.0", "v1.0.0-rc.1"));
    }

    #[test]
    fn test_is_newer_unparseable_falls_back_to_inequality() {
        assert!(is_newer("master", "v1.0.0"));
        assert!(!is_newer("master", "master"));
    }

    #[test]
    fn test_change_type() {
        assert_eq!(
            VersionChangeType::from_versions("v1.2.3", "v2.0.0"),
            VersionChangeType::Major
        );
        assert_eq!(
            VersionChangeType::from_versions("v1.2.3", "v1.3.0"),
            VersionChangeType::Minor
        );
        assert_eq!(
            VersionChangeType::from_versions("v1.2.3", "v1.2.9"),
            VersionChangeType::Patch
        );
        assert_eq!(
            VersionChangeType::from_versions("v1.2.3", "v1.2.4-0.20230101120000-abcdef123456"),
            VersionChangeType::Commit
        );
        assert_eq!(
            VersionChangeType::from_versions("", "v1.0.0"),
            VersionChangeType::Unknown
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(VersionChangeType::Major.label(), "major");
        assert_eq!(VersionChangeType::Commit.label(), "commit");
        assert_eq!(VersionChangeType::Unknown.label(), "?");
    }
}
