//! Upgrade registry built from the `go list -u -m -json all` listing
//!
//! This module provides:
//! - Parsing of the concatenated JSON record stream (or a JSON array)
//! - Per-record recovery: unusable records are skipped with a warning
//! - Lookup of upgrade availability by module identity

mod record;

pub use record::{ModuleRecord, UpdateField, UpgradeRecord};

use crate::domain::version::is_newer;
use crate::domain::{ModuleIdentity, UpgradeCandidate};
use crate::error::DeptreeError;
use serde_json::Value;
use std::collections::HashMap;

/// Result of a registry lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeStatus {
    pub has_upgrade: bool,
    pub candidate: Option<UpgradeCandidate>,
    pub indirect: bool,
}

/// Lookup from module identity to upgrade availability
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<ModuleIdentity, UpgradeRecord>,
    /// First identity seen per module path
    by_path: HashMap<String, ModuleIdentity>,
    warnings: Vec<String>,
}

impl Registry {
    /// Parses a raw upgrade listing
    ///
    /// Fails only if the listing as a whole is unusable: invalid JSON,
    /// no record at all, or no record with a module path.
    pub fn fill(raw: &[u8]) -> Result<Self, DeptreeError> {
        let mut values = Vec::new();
        for item in serde_json::Deserializer::from_slice(raw).into_iter::<Value>() {
            match item.map_err(|e| DeptreeError::parse(e.to_string()))? {
                Value::Array(items) => values.extend(items),
                other => values.push(other),
            }
        }

        if values.is_empty() {
            return Err(DeptreeError::parse("listing contains no module record"));
        }

        let mut registry = Registry::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<ModuleRecord>(value) {
                Ok(record) => match UpgradeRecord::from_record(record) {
                    Some(record) => registry.insert(record),
                    None => registry.warn(format!(
                        "skipping upgrade record {}: missing or invalid module path",
                        index + 1
                    )),
                },
                Err(e) => registry.warn(format!("skipping upgrade record {}: {}", index + 1, e)),
            }
        }

        if registry.is_empty() {
            return Err(DeptreeError::parse("no record carries a module path"));
        }

        tracing::debug!(
            "registry holds {} modules, {} with updates",
            registry.len(),
            registry.upgradable_count()
        );
        Ok(registry)
    }

    /// Builds a registry from already parsed records
    pub fn from_records(records: impl IntoIterator<Item = UpgradeRecord>) -> Self {
        let mut registry = Registry::default();
        for record in records {
            registry.insert(record);
        }
        registry
    }

    fn insert(&mut self, record: UpgradeRecord) {
        let identity = ModuleIdentity::new(record.path.clone(), record.version.clone());
        if self.records.contains_key(&identity) {
            tracing::debug!("ignoring repeated upgrade record for {}", identity);
            return;
        }
        self.by_path
            .entry(record.path.clone())
            .or_insert_with(|| identity.clone());
        self.records.insert(identity, record);
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Looks up upgrade availability, unknown modules are current
    ///
    /// An exact (path, version) record wins over the first record of the path.
    /// A versioned identity only has an upgrade if the candidate is newer.
    pub fn lookup(&self, identity: &ModuleIdentity) -> UpgradeStatus {
        let record = self.records.get(identity).or_else(|| {
            self.by_path
                .get(&identity.path)
                .and_then(|key| self.records.get(key))
        });
        let Some(record) = record else {
            return UpgradeStatus::default();
        };

        let candidate = record
            .update
            .as_deref()
            .filter(|_| !record.main)
            .filter(|update| !identity.has_version() || is_newer(update, &identity.version))
            .map(|update| UpgradeCandidate::new(update).with_released_at(record.update_time));

        UpgradeStatus {
            has_upgrade: candidate.is_some(),
            candidate,
            indirect: record.indirect,
        }
    }

    /// Warnings recorded for skipped records
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of module records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the registry holds no record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with an available update
    pub fn upgradable_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.update.is_some() && !r.main)
            .count()
    }
}
