//! Command handlers for casectl.
//!
//! Handlers write to the supplied writer so tests can capture output.

use anyhow::{Context, Result};
use chrono::Datelike;
use serde_json::json;
use std::io::Write;
use tracing::{debug, warn};

use casedesk_common::calendar::CalendarConfig;
use casedesk_common::config::AppConfig;
use casedesk_common::scheduler::{render_schedule, Schedule};
use casedesk_common::{
    Case, CaseKey, CaseStore, CaseType, ScheduleCalculator, Severity, Workbench,
};

use crate::cli::{Cli, Commands};

/// Resolve config from `--config` (or the default location), then apply `--data`.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(data) = &cli.data {
        config.storage.cases_file = data.clone();
    }
    Ok(config)
}

/// Calendar day standing for a weekday. Positions count from Monday, and a
/// weekday past the end of a short cycle falls back to the cycle's last day.
pub fn calendar_day_for(calendar: &CalendarConfig, weekday: chrono::Weekday) -> Result<String> {
    let position = weekday.num_days_from_monday() as usize;
    let last = calendar
        .len()
        .checked_sub(1)
        .context("Calendar has no days")?;
    if position > last {
        warn!(%weekday, "weekday is outside the calendar, using its last day");
    }
    Ok(calendar.day(position.min(last)).name)
}

/// Map "today" to the calendar's name for the local weekday; anything else
/// passes through.
pub fn resolve_day(calendar: &CalendarConfig, day: &str) -> Result<String> {
    if day.trim().eq_ignore_ascii_case("today") {
        calendar_day_for(calendar, chrono::Local::now().weekday())
    } else {
        Ok(day.to_string())
    }
}

fn calculator(config: &AppConfig) -> Result<ScheduleCalculator> {
    ScheduleCalculator::new(config.calendar.clone()).context("Invalid calendar configuration")
}

fn open_workbench(config: &AppConfig) -> Result<Workbench> {
    let path = &config.storage.cases_file;
    let store = CaseStore::open(path)
        .with_context(|| format!("Failed to load cases from {}", path.display()))?;
    let mut bench = Workbench::new(store, calculator(config)?);
    bench.events_mut().on_field_changed(|case| {
        debug!(case = %case, day = %case.last_contact_day, "case updated")
    });
    bench
        .events_mut()
        .on_selection_changed(|key| debug!(key = %key, "case selected"));
    Ok(bench)
}

fn write_schedule(
    out: &mut dyn Write,
    json_output: bool,
    case: &Case,
    schedule: &Schedule,
) -> Result<()> {
    if json_output {
        let value = json!({ "case": case, "schedule": schedule });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "{}", render_schedule(schedule))?;
    }
    Ok(())
}

pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Add {
            case_number,
            case_type,
            day,
            severity,
        } => add(&config, cli.json, out, case_number, *case_type, day, *severity),
        Commands::List { case_type } => list(&config, cli.json, out, *case_type),
        Commands::Show {
            case_number,
            case_type,
        } => show(&config, cli.json, out, CaseKey::new(case_number.as_str(), *case_type)),
        Commands::Delete {
            case_number,
            case_type,
        } => delete(&config, out, CaseKey::new(case_number.as_str(), *case_type)),
        Commands::Schedule {
            case_type,
            day,
            severity,
        } => schedule(&config, cli.json, out, *case_type, day, *severity),
        Commands::Config => {
            write!(out, "{}", config.to_toml()?)?;
            Ok(())
        }
    }
}

fn add(
    config: &AppConfig,
    json_output: bool,
    out: &mut dyn Write,
    case_number: &str,
    case_type: CaseType,
    day: &str,
    severity: Severity,
) -> Result<()> {
    let mut bench = open_workbench(config)?;
    let day = resolve_day(&config.calendar, day)?;
    let case = Case::new(case_number, case_type, day, severity);
    let key = case.key();

    let previous = bench.save_case(case)?;
    let stored = bench
        .store()
        .get(&key)
        .cloned()
        .with_context(|| format!("Case {} missing after save", key))?;
    let schedule = bench.schedule_for(&key)?;

    if !json_output {
        let verb = if previous.is_some() { "Updated" } else { "Saved" };
        writeln!(out, "{} {}\n", verb, stored)?;
    }
    write_schedule(out, json_output, &stored, &schedule)
}

fn list(
    config: &AppConfig,
    json_output: bool,
    out: &mut dyn Write,
    case_type: Option<CaseType>,
) -> Result<()> {
    let path = &config.storage.cases_file;
    let store = CaseStore::open(path)
        .with_context(|| format!("Failed to load cases from {}", path.display()))?;

    let cases: Vec<&Case> = match case_type {
        Some(t) => store.list(t).collect(),
        None => store.iter().collect(),
    };

    if json_output {
        writeln!(out, "{}", serde_json::to_string_pretty(&cases)?)?;
        return Ok(());
    }

    if cases.is_empty() {
        writeln!(out, "No cases stored.")?;
        return Ok(());
    }
    for case in cases {
        writeln!(
            out,
            "{:<24} {:<10} {}",
            case.key().to_string(),
            case.last_contact_day,
            case.severity
        )?;
    }
    Ok(())
}

fn show(config: &AppConfig, json_output: bool, out: &mut dyn Write, key: CaseKey) -> Result<()> {
    let bench = open_workbench(config)?;
    if json_output {
        let schedule = bench.select_schedule(&key)?;
        let case = bench
            .store()
            .get(&key)
            .with_context(|| format!("Case {} missing", key))?;
        return write_schedule(out, true, case, &schedule);
    }
    writeln!(out, "{}", bench.select(&key)?)?;
    Ok(())
}

fn delete(config: &AppConfig, out: &mut dyn Write, key: CaseKey) -> Result<()> {
    let mut bench = open_workbench(config)?;
    let removed = bench.delete_case(&key)?;
    writeln!(out, "Deleted {}", removed)?;
    Ok(())
}

fn schedule(
    config: &AppConfig,
    json_output: bool,
    out: &mut dyn Write,
    case_type: CaseType,
    day: &str,
    severity: Severity,
) -> Result<()> {
    let calc = calculator(config)?;
    let day = resolve_day(&config.calendar, day)?;
    let case = Case::new("-", case_type, day, severity);
    let schedule = calc.calculate_schedule(&case)?;
    write_schedule(out, json_output, &case, &schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_resolve_day_passes_names_through() {
        let calendar = CalendarConfig::default();
        assert_eq!(resolve_day(&calendar, "Monday").unwrap(), "Monday");
        assert_eq!(resolve_day(&calendar, "someday").unwrap(), "someday");

        let today = resolve_day(&calendar, " Today ").unwrap();
        assert!(calendar.index_of(&today).is_ok());
    }

    #[test]
    fn test_weekend_today_falls_back_on_short_calendar() {
        let calendar = CalendarConfig::default();
        assert_eq!(calendar_day_for(&calendar, chrono::Weekday::Wed).unwrap(), "Wednesday");
        assert_eq!(calendar_day_for(&calendar, chrono::Weekday::Sat).unwrap(), "Friday");
        assert_eq!(calendar_day_for(&calendar, chrono::Weekday::Sun).unwrap(), "Friday");

        let week = CalendarConfig::full_week_with_weekend();
        assert_eq!(calendar_day_for(&week, chrono::Weekday::Sat).unwrap(), "Saturday");
    }

    #[test]
    fn test_today_uses_configured_names() {
        let calendar = CalendarConfig {
            weekdays: ["Lunes", "Martes", "Miercoles", "Jueves", "Viernes"]
                .map(String::from)
                .to_vec(),
            ..CalendarConfig::default()
        };
        assert_eq!(calendar_day_for(&calendar, chrono::Weekday::Tue).unwrap(), "Martes");
        assert_eq!(calendar_day_for(&calendar, chrono::Weekday::Sun).unwrap(), "Viernes");

        let today = resolve_day(&calendar, "today").unwrap();
        assert!(calendar.index_of(&today).is_ok());
    }

    #[test]
    fn test_schedule_command() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();

        let text = run_args(&[
            "casectl",
            "--config",
            config.to_str().unwrap(),
            "schedule",
            "--type",
            "follow-up",
            "--day",
            "Monday",
            "--severity",
            "C",
        ])
        .unwrap();
        assert!(text.contains("Follow-up #3: Tuesday"));
    }

    #[test]
    fn test_add_list_show_delete() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();
        let data = dir.path().join("cases.json");
        let base = [
            "casectl",
            "--config",
            config.to_str().unwrap(),
            "--data",
            data.to_str().unwrap(),
        ];
        let with = |rest: &[&str]| -> Vec<String> {
            base.iter().chain(rest).map(|s| s.to_string()).collect()
        };
        let exec = |args: Vec<String>| -> Result<String> {
            let refs: Vec<&str> = args.iter().map(String::as_str).collect();
            run_args(&refs)
        };

        let added =
            exec(with(&["add", "555", "-t", "strike", "-d", "tuesday", "-s", "B"])).unwrap();
        assert!(added.starts_with("Saved Case 555 (Strikes)"));
        assert!(added.contains("Strike #1: Wednesday"));

        let listed = exec(with(&["list"])).unwrap();
        assert!(listed.contains("555_Strikes"));
        assert!(listed.contains("Tuesday"));

        let shown = exec(with(&["show", "555", "-t", "strikes"])).unwrap();
        assert!(shown.contains("Recovery Period: Monday - Tuesday"));

        let deleted = exec(with(&["delete", "555", "-t", "strike"])).unwrap();
        assert!(deleted.contains("Deleted Case 555"));
        assert_eq!(exec(with(&["list"])).unwrap().trim(), "No cases stored.");
    }
}
