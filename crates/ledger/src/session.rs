//! In-process store the presentation layer talks to.
//!
//! A `Session` owns the current ledger snapshot and is the single writer:
//! readers take [`Session::snapshot`] (cheap `Arc` clone) and writers call
//! [`Session::dispatch`].

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use gigledger_core::AggregateRoot;

use crate::command::LedgerCommand;
use crate::reports::LedgerReport;
use crate::state::{LedgerSettings, LedgerState, reduce};

#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<LedgerState>,
}

impl Session {
    /// Start a session seeded with the default companies.
    pub fn new(settings: LedgerSettings) -> Self {
        Self::from_state(LedgerState::seeded(settings))
    }

    /// Start a session from an arbitrary snapshot (e.g. an empty ledger).
    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Shared handle on the current snapshot; later dispatches do not affect it.
    pub fn snapshot(&self) -> Arc<LedgerState> {
        Arc::clone(&self.state)
    }

    /// Apply a command and return the resulting snapshot.
    pub fn dispatch(&mut self, command: LedgerCommand) -> Arc<LedgerState> {
        let next = reduce(&self.state, &command);
        let events = next.version() - self.state.version();

        if events == 0 {
            debug!(command = command.kind(), "command decided no events; state unchanged");
            return self.snapshot();
        }

        let totals = next.totals();
        info!(
            command = command.kind(),
            events,
            version = next.version(),
            total_earnings = %totals.total_earnings,
            total_fuel_cost = %totals.total_fuel_cost,
            net_profit = %totals.net_profit,
            "command applied"
        );

        self.state = Arc::new(next);
        self.snapshot()
    }

    /// Dashboard figures for `today`.
    pub fn report(&self, today: NaiveDate) -> LedgerReport {
        LedgerReport::build(&self.state, today)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LedgerSettings::default())
    }
}
