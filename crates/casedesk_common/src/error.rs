//! Error types for casedesk.

use thiserror::Error;

use crate::case::CaseKey;

/// Raised by the schedule calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid day: '{0}' is not a configured weekday")]
    InvalidDay(String),
}

/// Raised when a calendar configuration cannot back a calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Calendar has no weekdays")]
    EmptyCycle,

    #[error("Duplicate weekday name: '{0}'")]
    DuplicateDay(String),

    #[error("Weekend index {index} is outside a {len}-day calendar")]
    WeekendOutOfRange { index: usize, len: usize },

    #[error("Weekend skipping needs a 7-day calendar, got {0} days")]
    WeekendNeedsFullWeek(usize),

    #[error("Every calendar position is marked as weekend")]
    NoBusinessDays,

    #[error("Interval '{0}' must be at least 1")]
    ZeroInterval(&'static str),
}

/// Raised by the case store and workbench.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Case not found: {0}")]
    NotFound(CaseKey),

    #[error("Case number must not be empty")]
    EmptyCaseNumber,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Process exit code for CLI front ends.
    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::NotFound(_) => 3,
            StoreError::EmptyCaseNumber | StoreError::Schedule(_) => 2,
            StoreError::Io(_) | StoreError::Json(_) => 74,
        }
    }
}
