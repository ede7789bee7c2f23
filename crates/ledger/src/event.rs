use serde::{Deserialize, Serialize};

use gigledger_core::{CompanyId, DeliveryId, Event, FuelRecordId};

use crate::company::Company;
use crate::delivery::Delivery;
use crate::fuel::FuelRecord;

/// Event: CompanyDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDeleted {
    pub company_id: CompanyId,
    /// Deliveries removed by the cascade.
    pub deliveries_removed: Vec<DeliveryId>,
}

/// Facts decided by the ledger in response to a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    CompanyAdded(Company),
    CompanyUpdated(Company),
    CompanyDeleted(CompanyDeleted),
    DeliveryAdded(Delivery),
    /// Carries the removed record so the company count can be decremented.
    DeliveryDeleted(Delivery),
    FuelRecordAdded(FuelRecord),
    FuelRecordDeleted(FuelRecordId),
    TotalsRecomputed,
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::CompanyAdded(_) => "ledger.company.added",
            LedgerEvent::CompanyUpdated(_) => "ledger.company.updated",
            LedgerEvent::CompanyDeleted(_) => "ledger.company.deleted",
            LedgerEvent::DeliveryAdded(_) => "ledger.delivery.added",
            LedgerEvent::DeliveryDeleted(_) => "ledger.delivery.deleted",
            LedgerEvent::FuelRecordAdded(_) => "ledger.fuel_record.added",
            LedgerEvent::FuelRecordDeleted(_) => "ledger.fuel_record.deleted",
            LedgerEvent::TotalsRecomputed => "ledger.totals.recomputed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
