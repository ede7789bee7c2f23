//! Environment-driven configuration.
//!
//! | variable | default |
//! |---|---|
//! | `GIGLEDGER_FUEL_PRICE` | `5.50` |
//! | `GIGLEDGER_SEED_COMPANIES` | `true` |
//! | `GIGLEDGER_TODAY` | local date |
//! | `GIGLEDGER_LOG_FORMAT` | `json` (`json` or `compact`) |
//!
//! Invalid values are logged and replaced by the default.

use chrono::NaiveDate;
use tracing::warn;

use gigledger_core::Money;
use gigledger_ledger::{DEFAULT_FUEL_PRICE, LedgerSettings, LedgerState, Session};
use gigledger_ledger::validation::DATE_FORMAT;
use gigledger_observability::LogFormat;

pub const FUEL_PRICE_VAR: &str = "GIGLEDGER_FUEL_PRICE";
pub const SEED_COMPANIES_VAR: &str = "GIGLEDGER_SEED_COMPANIES";
pub const TODAY_VAR: &str = "GIGLEDGER_TODAY";
pub const LOG_FORMAT_VAR: &str = "GIGLEDGER_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fuel_price: Money,
    pub seed_companies: bool,
    /// Day used for the "today" figures of the report; `None` means the local date.
    pub today: Option<NaiveDate>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fuel_price: DEFAULT_FUEL_PRICE,
            seed_companies: true,
            today: None,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let fuel_price = match lookup(FUEL_PRICE_VAR) {
            None => defaults.fuel_price,
            Some(raw) => match raw.parse::<Money>() {
                Ok(price) if price.is_positive() => price,
                _ => {
                    warn!(var = FUEL_PRICE_VAR, value = %raw, "invalid fuel price; using default");
                    defaults.fuel_price
                }
            },
        };

        let seed_companies = match lookup(SEED_COMPANIES_VAR) {
            None => defaults.seed_companies,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    warn!(var = SEED_COMPANIES_VAR, value = %raw, "invalid boolean; using default");
                    defaults.seed_companies
                }
            },
        };

        let today = lookup(TODAY_VAR).and_then(|raw| match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                warn!(var = TODAY_VAR, value = %raw, "invalid date; using local date");
                None
            }
        });

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => defaults.log_format,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" | "text" => LogFormat::Compact,
                _ => {
                    warn!(var = LOG_FORMAT_VAR, value = %raw, "unknown log format; using default");
                    defaults.log_format
                }
            },
        };

        Self {
            fuel_price,
            seed_companies,
            today,
            log_format,
        }
    }

    pub fn settings(&self) -> LedgerSettings {
        LedgerSettings {
            fuel_price: self.fuel_price,
        }
    }

    pub fn session(&self) -> Session {
        if self.seed_companies {
            Session::new(self.settings())
        } else {
            Session::from_state(LedgerState::empty(self.settings()))
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
