//! Delivery ledger domain module.
//!
//! Companies, deliveries, fuel records and the totals derived from them,
//! implemented purely as deterministic domain logic (no IO, no storage).
//! Commands are applied with [`reduce`]; [`Session`] wraps that for callers.

pub mod command;
pub mod company;
pub mod delivery;
pub mod event;
pub mod fuel;
pub mod reports;
pub mod session;
pub mod state;
pub mod totals;
pub mod validation;

pub use command::{
    AddCompany, AddDelivery, AddFuelRecord, DeleteCompany, DeleteDelivery, DeleteFuelRecord,
    LedgerCommand,
};
pub use company::{COLOR_PALETTE, Color, Company, default_companies};
pub use delivery::Delivery;
pub use event::{CompanyDeleted, LedgerEvent};
pub use fuel::{DEFAULT_FUEL_PRICE, FuelEfficiency, FuelRecord, previous_fill_up};
pub use reports::{CompanyEarnings, DaySummary, LedgerReport};
pub use session::Session;
pub use state::{LedgerSettings, LedgerState, reduce};
pub use totals::DerivedTotals;
pub use validation::{CompanyDraft, DeliveryDraft, FuelDraft};
