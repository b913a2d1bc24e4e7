//! Shared types and logic for casedesk.
//!
//! The schedule calculator is pure; the store, events and workbench wrap it
//! for front ends such as `casectl`.

pub mod calendar;
pub mod case;
pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod store;
pub mod workbench;

pub use calendar::{CalendarConfig, Weekday};
pub use case::{Case, CaseKey, CaseType, Severity};
pub use error::{CalendarError, ScheduleError, StoreError};
pub use scheduler::{RecoveryWindow, Schedule, ScheduleCalculator};
pub use store::CaseStore;
pub use workbench::Workbench;
