//! Schedule calculator.
//!
//! Turns a case into its follow-up days, or its strike days plus a recovery
//! window, by stepping around the configured calendar cycle. Everything here
//! is a pure function of the calendar and the case.
//!
//! Follow-ups: the i-th day (i = 1..3) sits `i * interval` steps after the
//! last contact, with the interval picked by severity.
//!
//! Strikes: each strike steps from the previous one. The first step depends
//! on severity, the next two use the fixed strike interval. The recovery
//! window covers the two days after the *second* strike.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CalendarConfig, Weekday};
use crate::case::{Case, CaseType};
use crate::error::{CalendarError, ScheduleError};

/// Number of follow-ups and of strikes in a schedule
pub const SCHEDULE_LEN: usize = 3;

/// Days reserved after the second strike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryWindow {
    pub start: Weekday,
    pub end: Weekday,
}

/// Computed schedule for one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    FollowUp {
        days: [Weekday; SCHEDULE_LEN],
    },
    Strike {
        days: [Weekday; SCHEDULE_LEN],
        recovery: RecoveryWindow,
    },
}

impl Schedule {
    pub fn days(&self) -> &[Weekday; SCHEDULE_LEN] {
        match self {
            Schedule::FollowUp { days } | Schedule::Strike { days, .. } => days,
        }
    }

    pub fn recovery(&self) -> Option<&RecoveryWindow> {
        match self {
            Schedule::FollowUp { .. } => None,
            Schedule::Strike { recovery, .. } => Some(recovery),
        }
    }
}

/// Calculator bound to a validated calendar
#[derive(Debug, Clone, Default)]
pub struct ScheduleCalculator {
    calendar: CalendarConfig,
}

impl ScheduleCalculator {
    pub fn new(calendar: CalendarConfig) -> Result<Self, CalendarError> {
        calendar.validate()?;
        Ok(Self { calendar })
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Advance `interval` counted steps from `start_index`.
    ///
    /// Without weekends this is plain modulo arithmetic. With weekends, each
    /// step that lands on a weekend position is passed through uncounted.
    /// Whole turns of the cycle are dropped first, so any interval is cheap.
    pub fn next_business_day(&self, start_index: usize, interval: u64) -> usize {
        let len = self.calendar.len();
        if !self.calendar.skips_weekends() {
            let steps = (interval % len as u64) as usize;
            return (start_index % len + steps) % len;
        }

        // After the first counted step, every `business` further steps come
        // back to the same day.
        let business = self.calendar.business_days() as u64;
        let steps = if interval == 0 {
            0
        } else {
            (interval - 1) % business + 1
        };

        let mut index = start_index % len;
        let mut counted = 0;
        while counted < steps {
            index = (index + 1) % len;
            if !self.calendar.is_weekend(index) {
                counted += 1;
            }
        }
        index
    }

    pub fn calculate_follow_ups(
        &self,
        case: &Case,
    ) -> Result<[Weekday; SCHEDULE_LEN], ScheduleError> {
        let start = self.calendar.index_of(&case.last_contact_day)?;
        let interval = u64::from(
            self.calendar
                .follow_up_base_interval
                .for_severity(case.severity),
        );

        let days = [1u64, 2, 3]
            .map(|i| self.calendar.day(self.next_business_day(start, i * interval)));

        debug!(case = %case.key(), ?days, "computed follow-ups");
        Ok(days)
    }

    pub fn calculate_strikes(
        &self,
        case: &Case,
    ) -> Result<([Weekday; SCHEDULE_LEN], RecoveryWindow), ScheduleError> {
        let start = self.calendar.index_of(&case.last_contact_day)?;
        let fixed = self.calendar.strike_fixed_interval;
        let intervals = [
            self.calendar.strike_base_interval.for_severity(case.severity),
            fixed,
            fixed,
        ];

        let mut current = start;
        let strikes = intervals.map(|interval| {
            current = self.next_business_day(current, u64::from(interval));
            current
        });

        let second = strikes[1];
        let recovery = RecoveryWindow {
            start: self.calendar.day(self.next_business_day(second, 1)),
            end: self.calendar.day(self.next_business_day(second, 2)),
        };
        let days = strikes.map(|i| self.calendar.day(i));

        debug!(case = %case.key(), ?days, ?recovery, "computed strikes");
        Ok((days, recovery))
    }

    pub fn calculate_schedule(&self, case: &Case) -> Result<Schedule, ScheduleError> {
        match case.case_type {
            CaseType::FollowUp => Ok(Schedule::FollowUp {
                days: self.calculate_follow_ups(case)?,
            }),
            CaseType::Strike => {
                let (days, recovery) = self.calculate_strikes(case)?;
                Ok(Schedule::Strike { days, recovery })
            }
        }
    }

    /// Human-readable schedule text for a case.
    pub fn format_schedule(&self, case: &Case) -> Result<String, ScheduleError> {
        Ok(render_schedule(&self.calculate_schedule(case)?))
    }
}

/// Render an already computed schedule.
pub fn render_schedule(schedule: &Schedule) -> String {
    match schedule {
        Schedule::FollowUp { days } => {
            let mut out = String::from("Follow-up Schedule:\n");
            for (n, day) in days.iter().enumerate() {
                out.push_str(&format!("\nFollow-up #{}: {}", n + 1, day));
            }
            out
        }
        Schedule::Strike { days, recovery } => {
            let mut out = String::from("Strike Schedule:\n");
            for (n, day) in days.iter().enumerate() {
                out.push_str(&format!("\nStrike #{}: {}", n + 1, day));
            }
            out.push_str(&format!(
                "\n\nRecovery Period: {} - {}",
                recovery.start, recovery.end
            ));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Severity;

    fn names(days: &[Weekday]) -> Vec<&str> {
        days.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_next_business_day_wraps() {
        let calc = ScheduleCalculator::default();
        assert_eq!(calc.next_business_day(0, 1), 1);
        assert_eq!(calc.next_business_day(4, 1), 0);
        assert_eq!(calc.next_business_day(3, 7), 0);
        assert_eq!(calc.next_business_day(2, 0), 2);
    }

    #[test]
    fn test_next_business_day_skips_weekend() {
        let calc = ScheduleCalculator::new(CalendarConfig::full_week_with_weekend()).unwrap();
        // Friday + 1 lands on Monday
        assert_eq!(calc.next_business_day(4, 1), 0);
        // Thursday + 2: Friday counts, weekend passes, Monday counts
        assert_eq!(calc.next_business_day(3, 2), 0);
        // Saturday + 1 lands on Monday
        assert_eq!(calc.next_business_day(5, 1), 0);
        assert_eq!(calc.next_business_day(0, 5), 0);
    }

    #[test]
    fn test_next_business_day_drops_whole_cycles() {
        let calc = ScheduleCalculator::default();
        assert_eq!(calc.next_business_day(1, 5_000_000_002), 3);

        let weekend = ScheduleCalculator::new(CalendarConfig::full_week_with_weekend()).unwrap();
        assert_eq!(weekend.next_business_day(0, 5), 0);
        assert_eq!(weekend.next_business_day(0, 5_000_000_001), 1);
        assert_eq!(weekend.next_business_day(5, 5_000_000_000), 4);
    }

    #[test]
    fn test_follow_ups_severity_b_monday() {
        let calc = ScheduleCalculator::default();
        let case = Case::new("1", CaseType::FollowUp, "Monday", Severity::B);
        let days = calc.calculate_follow_ups(&case).unwrap();
        assert_eq!(names(&days), ["Tuesday", "Wednesday", "Thursday"]);
    }

    #[test]
    fn test_follow_ups_severity_c_monday_wraps() {
        let calc = ScheduleCalculator::default();
        let case = Case::new("1", CaseType::FollowUp, "Monday", Severity::C);
        let days = calc.calculate_follow_ups(&case).unwrap();
        assert_eq!(names(&days), ["Wednesday", "Friday", "Tuesday"]);
    }

    #[test]
    fn test_strikes_recovery_follows_second_strike() {
        let calc = ScheduleCalculator::default();
        let case = Case::new("1", CaseType::Strike, "Monday", Severity::B);
        let (days, recovery) = calc.calculate_strikes(&case).unwrap();

        assert_eq!(names(&days), ["Tuesday", "Thursday", "Monday"]);
        assert_eq!(recovery.start.name, "Friday");
        assert_eq!(recovery.end.name, "Monday");
    }

    #[test]
    fn test_invalid_day() {
        let calc = ScheduleCalculator::default();
        let case = Case::new("1", CaseType::FollowUp, "", Severity::B);
        assert_eq!(
            calc.calculate_follow_ups(&case),
            Err(ScheduleError::InvalidDay(String::new()))
        );
    }

    #[test]
    fn test_render_follow_up() {
        let calc = ScheduleCalculator::default();
        let case = Case::new("1", CaseType::FollowUp, "Monday", Severity::B);
        let text = calc.format_schedule(&case).unwrap();
        assert_eq!(
            text,
            concat!(
                "Follow-up Schedule:\n",
                "\nFollow-up #1: Tuesday",
                "\nFollow-up #2: Wednesday",
                "\nFollow-up #3: Thursday",
            )
        );
    }
}
