pub mod action;
pub mod checkin;
pub mod completions;
pub mod config;
pub mod goal;
pub mod habit;
pub mod insights;
pub mod profile;
pub mod reflect;
pub mod reset;
pub mod status;

use chrono::{Local, NaiveDate};
use growthtree_core::{Applied, Config, FileGateway, Session};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Local calendar date used for day-based bookkeeping.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Open the session stored in the data directory.
pub fn open_session(config: &Config) -> Result<Session<FileGateway>, Box<dyn std::error::Error>> {
    let gateway = FileGateway::open_default()?;
    Ok(Session::open(gateway, config, today())?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an operation result, reporting persistence warnings on stderr and
/// logging the events it produced.
pub fn finish<T: Serialize>(session: &mut Session<FileGateway>, applied: Applied<T>) -> CliResult {
    for event in session.drain_events() {
        tracing::debug!(?event, "Progress event");
    }
    for warning in &applied.warnings {
        eprintln!("warning: could not save '{}': {}", warning.key, warning.message);
    }
    print_json(&applied.value)
}
