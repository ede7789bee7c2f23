//! JSON-lines command scripts.
//!
//! One `LedgerCommand` per line in serde's externally tagged form:
//!
//! ```text
//! # comments and blank lines are skipped
//! {"AddCompany":{"name":"Loggi","rate":"9.50","color":"#10B981"}}
//! {"AddFuelRecord":{"amount":"50.00","odometer_km":1000,"date":"2024-06-10"}}
//! "RecomputeTotals"
//! ```

use std::io::BufRead;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use gigledger_ledger::{LedgerCommand, LedgerReport, LedgerState, Session};

/// What the binary prints once a script has run.
#[derive(Debug, Serialize)]
pub struct Output<'a> {
    pub commands_applied: usize,
    pub state: &'a LedgerState,
    pub report: LedgerReport,
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> serde_json::Result<Option<LedgerCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Dispatch every command of `reader` into `session`, stopping at the first
/// malformed line. Returns the number of commands dispatched.
pub fn run_script<R: BufRead>(reader: R, session: &mut Session) -> anyhow::Result<usize> {
    let mut dispatched = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let Some(command) = parse_line(&line).with_context(|| format!("invalid command on line {line_no}"))? else {
            continue;
        };
        session.dispatch(command);
        dispatched += 1;
    }

    info!(commands = dispatched, "script finished");
    Ok(dispatched)
}

pub fn output(session: &Session, commands_applied: usize, today: NaiveDate) -> Output<'_> {
    Output {
        commands_applied,
        state: session.state(),
        report: session.report(today),
    }
}
