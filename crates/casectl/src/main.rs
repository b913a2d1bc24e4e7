//! Casectl - command-line front end for casedesk
//!
//! Records support cases and prints their follow-up or strike schedules.

use clap::Parser;
use std::process::ExitCode;

use casectl::cli::Cli;
use casectl::{commands, logging};
use casedesk_common::{ScheduleError, StoreError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match commands::run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<StoreError>()
                .map(StoreError::exit_code)
                .or_else(|| err.downcast_ref::<ScheduleError>().map(|_| 2))
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
