//! Records of the `go list -u -m -json all` listing

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One module record as printed by `go list -m -json`
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleRecord {
    #[serde(rename = "Path", alias = "path", default)]
    pub path: Option<String>,
    #[serde(rename = "Version", alias = "version", default)]
    pub version: Option<String>,
    #[serde(rename = "Update", alias = "update", default)]
    pub update: Option<UpdateField>,
    #[serde(rename = "Indirect", alias = "indirect", default)]
    pub indirect: bool,
    #[serde(rename = "Main", alias = "main", default)]
    pub main: bool,
}

/// The `Update` object of a module record
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateField {
    #[serde(rename = "Version", alias = "version")]
    pub version: String,
    #[serde(rename = "Time", alias = "time", default)]
    pub time: Option<String>,
}

impl UpdateField {
    /// Parses the RFC 3339 release time, if present and valid
    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.time.as_deref()?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(time) => Some(time.with_timezone(&Utc)),
            Err(e) => {
                tracing::debug!("ignoring update time '{}': {}", raw, e);
                None
            }
        }
    }
}

/// Upgrade availability for one module version, immutable once filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRecord {
    pub path: String,
    /// Currently resolved version
    pub version: String,
    /// Newer version, absent if none is available
    pub update: Option<String>,
    pub update_time: Option<DateTime<Utc>>,
    /// Required only through other modules
    pub indirect: bool,
    /// The main module of the listing
    pub main: bool,
}

impl UpgradeRecord {
    /// Creates a record without update information
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            update: None,
            update_time: None,
            indirect: false,
            main: false,
        }
    }

    /// Sets the available update (builder pattern)
    pub fn with_update(mut self, version: impl Into<String>) -> Self {
        self.update = Some(version.into());
        self
    }

    /// Marks the record as indirect (builder pattern)
    pub fn indirect(mut self) -> Self {
        self.indirect = true;
        self
    }

    /// Converts a raw listing record, `None` if its path is unusable
    pub fn from_record(record: ModuleRecord) -> Option<Self> {
        let path = record.path.map(|p| p.trim().to_string())?;
        if path.is_empty() || path.chars().any(char::is_whitespace) {
            return None;
        }

        let update_time = record.update.as_ref().and_then(UpdateField::released_at);
        let update = record
            .update
            .map(|u| u.version.trim().to_string())
            .filter(|v| !v.is_empty());

        Some(Self {
            path,
            version: record.version.unwrap_or_default().trim().to_string(),
            update,
            update_time,
            indirect: record.indirect,
            main: record.main,
        })
    }
}
