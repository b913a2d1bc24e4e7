//! Calendar configuration for the schedule calculator.
//!
//! The default calendar is the five-day working week with plain modulo
//! wrapping. A seven-day calendar with `weekend` positions switches the
//! calculator into weekend-skip mode, where weekend positions are passed
//! through without counting toward an interval.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::case::Severity;
use crate::error::{CalendarError, ScheduleError};

/// Default working week
pub const DEFAULT_WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Full week used by weekend-skip calendars
pub const FULL_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Fixed step between the second and third strikes
pub const DEFAULT_STRIKE_FIXED_INTERVAL: u32 = 2;

/// A resolved position in the calendar cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weekday {
    pub index: usize,
    pub name: String,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Step length per severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityIntervals {
    #[serde(rename = "B")]
    pub b: u32,
    #[serde(rename = "C")]
    pub c: u32,
}

impl SeverityIntervals {
    pub fn for_severity(&self, severity: Severity) -> u32 {
        match severity {
            Severity::B => self.b,
            Severity::C => self.c,
        }
    }
}

impl Default for SeverityIntervals {
    fn default() -> Self {
        Self { b: 1, c: 2 }
    }
}

/// Calendar and interval table consumed by the calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Ordered day names; indexing wraps modulo this length
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<String>,

    /// Positions excluded from interval counting. Empty means plain modulo.
    #[serde(default)]
    pub weekend: Vec<usize>,

    #[serde(default = "default_strike_fixed_interval")]
    pub strike_fixed_interval: u32,

    #[serde(default)]
    pub follow_up_base_interval: SeverityIntervals,

    #[serde(default)]
    pub strike_base_interval: SeverityIntervals,
}

fn default_weekdays() -> Vec<String> {
    DEFAULT_WEEKDAYS.iter().map(|d| d.to_string()).collect()
}

fn default_strike_fixed_interval() -> u32 {
    DEFAULT_STRIKE_FIXED_INTERVAL
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            weekdays: default_weekdays(),
            follow_up_base_interval: SeverityIntervals::default(),
            strike_base_interval: SeverityIntervals::default(),
            strike_fixed_interval: DEFAULT_STRIKE_FIXED_INTERVAL,
            weekend: Vec::new(),
        }
    }
}

impl CalendarConfig {
    /// Monday..Sunday with Saturday and Sunday skipped
    pub fn full_week_with_weekend() -> Self {
        Self {
            weekdays: FULL_WEEK.iter().map(|d| d.to_string()).collect(),
            weekend: vec![5, 6],
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.weekdays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty()
    }

    pub fn skips_weekends(&self) -> bool {
        !self.weekend.is_empty()
    }

    pub fn is_weekend(&self, index: usize) -> bool {
        self.weekend.contains(&index)
    }

    /// Positions that count toward an interval
    pub fn business_days(&self) -> usize {
        (0..self.len()).filter(|&i| !self.is_weekend(i)).count()
    }

    /// Check that the calendar can drive a calculator.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.weekdays.is_empty() {
            return Err(CalendarError::EmptyCycle);
        }

        let mut seen = HashSet::new();
        for name in &self.weekdays {
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(CalendarError::DuplicateDay(name.clone()));
            }
        }

        if self.skips_weekends() {
            if self.len() != FULL_WEEK.len() {
                return Err(CalendarError::WeekendNeedsFullWeek(self.len()));
            }
            for &index in &self.weekend {
                if index >= self.len() {
                    return Err(CalendarError::WeekendOutOfRange {
                        index,
                        len: self.len(),
                    });
                }
            }
            if self.business_days() == 0 {
                return Err(CalendarError::NoBusinessDays);
            }
        }

        let intervals = [
            ("follow_up_base_interval.B", self.follow_up_base_interval.b),
            ("follow_up_base_interval.C", self.follow_up_base_interval.c),
            ("strike_base_interval.B", self.strike_base_interval.b),
            ("strike_base_interval.C", self.strike_base_interval.c),
            ("strike_fixed_interval", self.strike_fixed_interval),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(CalendarError::ZeroInterval(name));
            }
        }

        Ok(())
    }

    /// Resolve a day name (case-insensitive, surrounding whitespace ignored).
    pub fn index_of(&self, name: &str) -> Result<usize, ScheduleError> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return Err(ScheduleError::InvalidDay(name.to_string()));
        }
        self.weekdays
            .iter()
            .position(|d| d.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScheduleError::InvalidDay(name.to_string()))
    }

    /// Day at `index`, wrapping around the cycle. Panics on an empty calendar.
    pub fn day(&self, index: usize) -> Weekday {
        let index = index % self.len();
        Weekday {
            index,
            name: self.weekdays[index].clone(),
        }
    }

    /// Canonical spelling of a day name.
    pub fn canonical_name(&self, name: &str) -> Result<&str, ScheduleError> {
        let index = self.index_of(name)?;
        Ok(&self.weekdays[index])
    }
}
