//! Module identity: a module path plus its resolved version

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one endpoint of a `go mod graph` edge
///
/// The main module is printed without a version, so `version` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleIdentity {
    /// Module path (e.g., `golang.org/x/text`)
    pub path: String,
    /// Resolved version (e.g., `v0.3.7`), empty for the main module
    pub version: String,
}

impl ModuleIdentity {
    /// Creates a new module identity
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// Creates an identity without a version
    pub fn unversioned(path: impl Into<String>) -> Self {
        Self::new(path, "")
    }

    /// Returns true if this identity carries a version
    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}

impl FromStr for ModuleIdentity {
    type Err = String;

    /// Parses `path@version` or a bare `path`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty module identity".to_string());
        }
        if s.chars().any(char::is_whitespace) {
            return Err(format!("module identity contains whitespace: '{}'", s));
        }

        match s.split_once('@') {
            Some((path, version)) => {
                if path.is_empty() {
                    return Err(format!("missing module path in '{}'", s));
                }
                if version.is_empty() || version.contains('@') {
                    return Err(format!("invalid module version in '{}'", s));
                }
                Ok(Self::new(path, version))
            }
            None => Ok(Self::unversioned(s)),
        }
    }
}

impl fmt::Display for ModuleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}@{}", self.path, self.version)
        }
    }
}
