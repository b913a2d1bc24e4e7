//! JSON-backed case store.
//!
//! File layout: one top-level object per case type (`"Follow-ups"`,
//! `"Strikes"`), each mapping case numbers to `{type, day, severity}`.
//!
//! A file that is not JSON fails to load. Inside a valid file, unknown
//! sections and unreadable records are skipped with a warning.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::case::{Case, CaseKey, CaseRecord, CaseType};
use crate::error::StoreError;

/// In-memory case table bound to a cases file
#[derive(Debug, Clone)]
pub struct CaseStore {
    path: PathBuf,
    cases: BTreeMap<CaseType, BTreeMap<String, Case>>,
}

impl CaseStore {
    /// Empty store that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let cases = CaseType::ALL
            .iter()
            .map(|t| (*t, BTreeMap::new()))
            .collect();
        Self {
            path: path.into(),
            cases,
        }
    }

    /// Load every case from `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        if !store.path.exists() {
            debug!(path = %store.path.display(), "no cases file yet");
            return Ok(store);
        }

        let contents = fs::read_to_string(&store.path)?;
        let data: Map<String, Value> = serde_json::from_str(&contents)?;

        for (section, entries) in data {
            let Ok(case_type) = section.parse::<CaseType>() else {
                warn!(section = %section, "skipping unknown section in cases file");
                continue;
            };
            let Value::Object(entries) = entries else {
                warn!(section = %section, "skipping section that is not an object");
                continue;
            };
            for (case_number, raw) in entries {
                let record = match serde_json::from_value::<CaseRecord>(raw) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!(
                            case_number = %case_number,
                            section = %case_type,
                            error = %err,
                            "skipping unreadable case record"
                        );
                        continue;
                    }
                };
                if record.case_type != case_type {
                    warn!(
                        case_number = %case_number,
                        section = %case_type,
                        record_type = %record.case_type,
                        "record type disagrees with its section, filing under section"
                    );
                }
                let mut case = Case::from_record(case_number, record);
                case.case_type = case_type;
                store.insert(case);
            }
        }

        info!(path = %store.path.display(), cases = store.len(), "loaded cases");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn insert(&mut self, case: Case) -> Option<Case> {
        self.cases
            .entry(case.case_type)
            .or_default()
            .insert(case.case_number.clone(), case)
    }

    /// Insert or replace the case with the same key.
    pub fn upsert(&mut self, case: Case) -> Option<Case> {
        debug!(key = %case.key(), "upsert");
        self.insert(case)
    }

    pub fn remove(&mut self, key: &CaseKey) -> Option<Case> {
        debug!(key = %key, "remove");
        self.cases
            .get_mut(&key.case_type)
            .and_then(|section| section.remove(&key.case_number))
    }

    pub fn get(&self, key: &CaseKey) -> Option<&Case> {
        self.cases
            .get(&key.case_type)
            .and_then(|section| section.get(&key.case_number))
    }

    /// Cases of one type, ordered by case number
    pub fn list(&self, case_type: CaseType) -> impl Iterator<Item = &Case> {
        self.cases.get(&case_type).into_iter().flat_map(|s| s.values())
    }

    /// Every case, follow-ups first
    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.values().flat_map(|s| s.values())
    }

    pub fn len(&self) -> usize {
        self.cases.values().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize to the on-disk layout.
    pub fn to_json(&self) -> Result<Value, StoreError> {
        let mut root = Map::new();
        for case_type in CaseType::ALL {
            let mut section = Map::new();
            for case in self.list(case_type) {
                section.insert(
                    case.case_number.clone(),
                    serde_json::to_value(case.to_record())?,
                );
            }
            root.insert(case_type.label().to_string(), Value::Object(section));
        }
        Ok(Value::Object(root))
    }

    /// Write the store to its file through a sibling temp file.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.to_json()?)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), cases = self.len(), "saved cases");
        Ok(())
    }
}
