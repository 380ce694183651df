//! Persistent deduction list.
//!
//! The deduction list is the only state that survives a restart. It is
//! stored as a JSON document carrying a schema version:
//!
//! ```text
//! { "version": 1, "deductions": [ { "id": ..., "type": "percentage", ... } ] }
//! ```
//!
//! Documents written by the browser dashboard (unversioned, camelCase,
//! wrapped in a `state` object) are migrated on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{HrisError, HrisResult};
use crate::models::{DeductionKind, DeductionPatch, DeductionType, NewDeduction};
use crate::validation::validate_deduction_list;

use super::RecordStore;

/// Current schema version of the persisted deduction document.
pub const DEDUCTION_SCHEMA_VERSION: u32 = 1;

/// On-disk representation of the deduction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDeductions {
    /// Schema version of this document.
    pub version: u32,
    /// The deduction definitions.
    pub deductions: Vec<DeductionType>,
}

/// Result of a remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// The deduction was removed.
    Removed,
    /// The deduction is a default and was kept.
    ProtectedDefault,
    /// No deduction has that id.
    NotFound,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct LegacyDocument {
    state: LegacyState,
}

#[derive(Debug, Deserialize)]
struct LegacyState {
    #[serde(default)]
    deductions: Option<Vec<LegacyDeduction>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDeduction {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: DeductionKind,
    value: rust_decimal::Decimal,
    #[serde(default)]
    is_default: bool,
    #[serde(default = "default_true")]
    is_active: bool,
}

impl From<LegacyDeduction> for DeductionType {
    fn from(legacy: LegacyDeduction) -> Self {
        DeductionType {
            id: legacy.id,
            name: legacy.name,
            kind: legacy.kind,
            value: legacy.value,
            is_default: legacy.is_default,
            is_active: legacy.is_active,
        }
    }
}

/// Upgrades a persisted deduction document to the current schema.
///
/// Returns `Ok(None)` for a legacy document without a deduction list, in
/// which case the caller keeps its defaults.
///
/// # Errors
///
/// Returns a message if the document is not a recognised shape or carries
/// a version newer than [`DEDUCTION_SCHEMA_VERSION`].
///
/// # Example
///
/// ```
/// use hris_engine::store::{migrate_deductions, DEDUCTION_SCHEMA_VERSION};
///
/// let legacy = serde_json::json!({
///     "state": {
///         "deductions": [
///             {"id": "epf-default", "name": "EPF", "type": "percentage",
///              "value": 8, "isDefault": true, "isActive": true}
///         ]
///     },
///     "version": 0
/// });
///
/// let migrated = migrate_deductions(legacy).unwrap().unwrap();
/// assert_eq!(migrated.version, DEDUCTION_SCHEMA_VERSION);
/// assert!(migrated.deductions[0].is_default);
/// ```
pub fn migrate_deductions(
    document: serde_json::Value,
) -> Result<Option<PersistedDeductions>, String> {
    if document.get("state").is_some() {
        let legacy: LegacyDocument =
            serde_json::from_value(document).map_err(|e| e.to_string())?;
        return Ok(legacy.state.deductions.map(|deductions| PersistedDeductions {
            version: DEDUCTION_SCHEMA_VERSION,
            deductions: deductions.into_iter().map(Into::into).collect(),
        }));
    }

    let version = document
        .get("version")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| "missing schema version".to_string())?;

    match version {
        1 => serde_json::from_value(document)
            .map(Some)
            .map_err(|e| e.to_string()),
        v => Err(format!(
            "unsupported schema version {} (latest is {})",
            v, DEDUCTION_SCHEMA_VERSION
        )),
    }
}

/// The deduction list, optionally backed by a JSON file.
#[derive(Debug, Clone)]
pub struct DeductionStore {
    records: RecordStore<DeductionType>,
    path: Option<PathBuf>,
}

impl DeductionStore {
    /// Creates a store that never touches disk.
    pub fn in_memory(defaults: Vec<DeductionType>) -> Self {
        Self {
            records: RecordStore::new(defaults),
            path: None,
        }
    }

    /// Opens the store at `path`, falling back to `defaults` when the file
    /// does not exist yet.
    ///
    /// Legacy documents are migrated and written back in the current schema.
    pub fn open<P: AsRef<Path>>(path: P, defaults: Vec<DeductionType>) -> HrisResult<Self> {
        let path = path.as_ref().to_path_buf();
        let path_str = path.display().to_string();

        if !path.exists() {
            debug!(path = %path_str, "No persisted deductions, using defaults");
            return Ok(Self {
                records: RecordStore::new(defaults),
                path: Some(path),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| HrisError::Persistence {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        let document: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| HrisError::Persistence {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let was_current = document.get("version").and_then(|v| v.as_u64())
            == Some(u64::from(DEDUCTION_SCHEMA_VERSION))
            && document.get("state").is_none();

        let migrated = migrate_deductions(document).map_err(|message| HrisError::Persistence {
            path: path_str.clone(),
            message,
        })?;

        let store = match migrated {
            Some(persisted) => Self {
                records: RecordStore::new(persisted.deductions),
                path: Some(path),
            },
            None => Self {
                records: RecordStore::new(defaults),
                path: Some(path),
            },
        };

        if !was_current {
            info!(path = %path_str, "Migrated persisted deductions to schema version {}", DEDUCTION_SCHEMA_VERSION);
            store.persist(store.all())?;
        }

        Ok(store)
    }

    /// Returns every deduction.
    pub fn all(&self) -> &[DeductionType] {
        self.records.all()
    }

    /// Returns the deduction with the given id.
    pub fn find(&self, id: &str) -> HrisResult<&DeductionType> {
        self.records.find(id)
    }

    /// Adds a deduction with a generated id and persists the list.
    ///
    /// The list in memory only changes once the write has succeeded.
    pub fn add(&mut self, new: NewDeduction) -> HrisResult<DeductionType> {
        let id = Uuid::new_v4().simple().to_string()[..9].to_string();
        let deduction = new.into_deduction(id);

        let mut candidate = self.records.all().to_vec();
        candidate.push(deduction.clone());
        self.commit(candidate)?;
        Ok(deduction)
    }

    /// Shallow-merges `patch` into a deduction and persists the list.
    pub fn update(&mut self, id: &str, patch: DeductionPatch) -> HrisResult<DeductionType> {
        let mut updated = self.records.find(id)?.clone();
        crate::store::Patch::apply(patch, &mut updated);

        let candidate = self
            .records
            .all()
            .iter()
            .map(|d| if d.id == id { updated.clone() } else { d.clone() })
            .collect();
        self.commit(candidate)?;
        Ok(updated)
    }

    /// Removes a non-default deduction.
    ///
    /// Default deductions are never removed; unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> HrisResult<RemoveOutcome> {
        match self.records.get(id) {
            None => Ok(RemoveOutcome::NotFound),
            Some(d) if d.is_default => Ok(RemoveOutcome::ProtectedDefault),
            Some(_) => {
                let candidate = self
                    .records
                    .all()
                    .iter()
                    .filter(|d| d.id != id)
                    .cloned()
                    .collect();
                self.commit(candidate)?;
                Ok(RemoveOutcome::Removed)
            }
        }
    }

    /// Validates and writes `candidate`, then makes it the live list.
    fn commit(&mut self, candidate: Vec<DeductionType>) -> HrisResult<()> {
        validate_deduction_list(&candidate)?;
        self.persist(&candidate)?;
        self.records.set(candidate);
        Ok(())
    }

    /// Writes `deductions` to disk if the store is file-backed.
    fn persist(&self, deductions: &[DeductionType]) -> HrisResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let path_str = path.display().to_string();
        let to_error = |message: String| HrisError::Persistence {
            path: path_str.clone(),
            message,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| to_error(e.to_string()))?;
        }

        let document = PersistedDeductions {
            version: DEDUCTION_SCHEMA_VERSION,
            deductions: deductions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|e| to_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| to_error(e.to_string()))?;

        debug!(path = %path_str, count = document.deductions.len(), "Persisted deductions");
        Ok(())
    }
}
