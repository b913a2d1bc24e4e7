//! Case records.
//!
//! A case is identified by its number together with its type, so the same
//! number may carry both a follow-up and a strike schedule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calendar::CalendarConfig;
use crate::error::StoreError;

/// Which schedule a case follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "Follow-ups")]
    FollowUp,
    #[serde(rename = "Strikes")]
    Strike,
}

impl CaseType {
    pub const ALL: [CaseType; 2] = [CaseType::FollowUp, CaseType::Strike];

    /// Label used in the cases file and in case keys
    pub fn label(&self) -> &'static str {
        match self {
            CaseType::FollowUp => "Follow-ups",
            CaseType::Strike => "Strikes",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "followup" | "followups" => Ok(CaseType::FollowUp),
            "strike" | "strikes" => Ok(CaseType::Strike),
            _ => Err(format!(
                "Invalid case type: '{}'. Valid values: follow-up, strike",
                s
            )),
        }
    }
}

/// Case urgency. B schedules tighter than C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    B,
    C,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::B => f.write_str("B"),
            Severity::C => f.write_str("C"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "B" | "b" => Ok(Severity::B),
            "C" | "c" => Ok(Severity::C),
            _ => Err(format!("Invalid severity: '{}'. Valid values: B, C", s)),
        }
    }
}

/// Composite identity of a case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseKey {
    pub case_number: String,
    pub case_type: CaseType,
}

impl CaseKey {
    pub fn new(case_number: impl Into<String>, case_type: CaseType) -> Self {
        Self {
            case_number: case_number.into(),
            case_type,
        }
    }
}

impl fmt::Display for CaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.case_number, self.case_type.label())
    }
}

impl FromStr for CaseKey {
    type Err = String;

    /// Parses `{case_number}_{case_type}`. Case numbers may themselves
    /// contain underscores, so the split happens on the last one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, kind) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("Invalid case key: '{}'", s))?;
        if number.is_empty() {
            return Err(format!("Invalid case key: '{}'", s));
        }
        Ok(CaseKey::new(number, kind.parse()?))
    }
}

/// Body of a case as stored under its number in the cases file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub day: String,
    pub severity: Severity,
}

/// A support case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub case_number: String,
    pub case_type: CaseType,
    pub last_contact_day: String,
    pub severity: Severity,
}

impl Case {
    pub fn new(
        case_number: impl Into<String>,
        case_type: CaseType,
        last_contact_day: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            case_number: case_number.into(),
            case_type,
            last_contact_day: last_contact_day.into(),
            severity,
        }
    }

    pub fn key(&self) -> CaseKey {
        CaseKey::new(self.case_number.clone(), self.case_type)
    }

    pub fn from_record(case_number: impl Into<String>, record: CaseRecord) -> Self {
        Self {
            case_number: case_number.into(),
            case_type: record.case_type,
            last_contact_day: record.day,
            severity: record.severity,
        }
    }

    pub fn to_record(&self) -> CaseRecord {
        CaseRecord {
            case_type: self.case_type,
            day: self.last_contact_day.clone(),
            severity: self.severity,
        }
    }

    /// Reject blank case numbers and days the calendar does not know.
    pub fn validate(&self, calendar: &CalendarConfig) -> Result<(), StoreError> {
        if self.case_number.trim().is_empty() {
            return Err(StoreError::EmptyCaseNumber);
        }
        calendar.index_of(&self.last_contact_day)?;
        Ok(())
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Case {} ({})", self.case_number, self.case_type)
    }
}
