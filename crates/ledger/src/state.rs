use core::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracing::debug;

use gigledger_core::{
    Aggregate, AggregateRoot, CompanyId, DeliveryId, Entity, Event, FuelRecordId, LedgerId, Money,
};

use crate::command::{
    AddCompany, AddDelivery, AddFuelRecord, DeleteCompany, DeleteDelivery, DeleteFuelRecord,
    LedgerCommand,
};
use crate::company::{Company, default_companies};
use crate::delivery::Delivery;
use crate::event::{CompanyDeleted, LedgerEvent};
use crate::fuel::{DEFAULT_FUEL_PRICE, FuelEfficiency, FuelRecord, previous_fill_up};
use crate::totals::DerivedTotals;

/// Fixed parameters of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Price per liter used to estimate fill-up volume.
    pub fuel_price: Money,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            fuel_price: DEFAULT_FUEL_PRICE,
        }
    }
}

/// Aggregate root: the whole session ledger.
///
/// Holds every company, delivery and fuel record plus the totals derived from
/// them. Mutated only through [`Aggregate::apply`]; use [`reduce`] to get a new
/// snapshot from a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerState {
    id: LedgerId,
    settings: LedgerSettings,
    companies: Vec<Company>,
    deliveries: Vec<Delivery>,
    fuel_records: Vec<FuelRecord>,
    totals: DerivedTotals,
    version: u64,
}

impl LedgerState {
    /// A ledger with no records at all.
    pub fn empty(settings: LedgerSettings) -> Self {
        Self {
            id: LedgerId::new(),
            settings,
            companies: Vec::new(),
            deliveries: Vec::new(),
            fuel_records: Vec::new(),
            totals: DerivedTotals::default(),
            version: 0,
        }
    }

    /// A ledger pre-populated with the default partner companies.
    pub fn seeded(settings: LedgerSettings) -> Self {
        Self {
            companies: default_companies(),
            ..Self::empty(settings)
        }
    }

    pub fn id_typed(&self) -> LedgerId {
        self.id
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn fuel_records(&self) -> &[FuelRecord] {
        &self.fuel_records
    }

    pub fn totals(&self) -> &DerivedTotals {
        &self.totals
    }

    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        find_by_id(&self.companies, &id)
    }

    pub fn delivery(&self, id: DeliveryId) -> Option<&Delivery> {
        find_by_id(&self.deliveries, &id)
    }

    pub fn fuel_record(&self, id: FuelRecordId) -> Option<&FuelRecord> {
        find_by_id(&self.fuel_records, &id)
    }

    /// Current name of the company a delivery belongs to.
    pub fn company_name(&self, delivery: &Delivery) -> Option<&str> {
        self.company(delivery.company_id).map(|c| c.name.as_str())
    }

    fn recompute_totals(&mut self) {
        self.totals = DerivedTotals::compute(&self.deliveries, &self.fuel_records);
    }
}

fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}

impl AggregateRoot for LedgerState {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for LedgerState {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = Infallible;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::CompanyAdded(company) => {
                self.companies.push(company.clone());
            }
            LedgerEvent::CompanyUpdated(company) => {
                if let Some(existing) = self.companies.iter_mut().find(|c| c.id == company.id) {
                    *existing = company.clone();
                }
            }
            LedgerEvent::CompanyDeleted(e) => {
                self.companies.retain(|c| c.id != e.company_id);
                self.deliveries.retain(|d| d.company_id != e.company_id);
            }
            LedgerEvent::DeliveryAdded(delivery) => {
                if let Some(company) = self.companies.iter_mut().find(|c| c.id == delivery.company_id) {
                    company.total_deliveries = company.total_deliveries.saturating_add(u64::from(delivery.deliveries));
                }
                self.deliveries.push(delivery.clone());
            }
            LedgerEvent::DeliveryDeleted(delivery) => {
                if let Some(company) = self.companies.iter_mut().find(|c| c.id == delivery.company_id) {
                    company.total_deliveries = company.total_deliveries.saturating_sub(u64::from(delivery.deliveries));
                }
                self.deliveries.retain(|d| d.id != delivery.id);
            }
            LedgerEvent::FuelRecordAdded(record) => {
                self.fuel_records.push(record.clone());
            }
            LedgerEvent::FuelRecordDeleted(id) => {
                self.fuel_records.retain(|r| r.id != *id);
            }
            LedgerEvent::TotalsRecomputed => {}
        }

        // Totals are rebuilt from the record sets after every event.
        self.recompute_totals();
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match command {
            LedgerCommand::AddCompany(cmd) => self.handle_add_company(cmd),
            LedgerCommand::UpdateCompany(company) => self.handle_update_company(company),
            LedgerCommand::DeleteCompany(cmd) => self.handle_delete_company(cmd),
            LedgerCommand::AddDelivery(cmd) => self.handle_add_delivery(cmd),
            LedgerCommand::DeleteDelivery(cmd) => self.handle_delete_delivery(cmd),
            LedgerCommand::AddFuelRecord(cmd) => self.handle_add_fuel_record(cmd),
            LedgerCommand::DeleteFuelRecord(cmd) => self.handle_delete_fuel_record(cmd),
            LedgerCommand::RecomputeTotals => vec![LedgerEvent::TotalsRecomputed],
        };
        Ok(events)
    }
}

impl LedgerState {
    fn handle_add_company(&self, cmd: &AddCompany) -> Vec<LedgerEvent> {
        vec![LedgerEvent::CompanyAdded(Company {
            id: CompanyId::new(),
            name: cmd.name.clone(),
            rate: cmd.rate,
            total_deliveries: 0,
            color: cmd.color.clone(),
        })]
    }

    fn handle_update_company(&self, company: &Company) -> Vec<LedgerEvent> {
        let Some(existing) = self.company(company.id) else {
            return Vec::new();
        };
        // The delivery count is owned by the ledger, not by the caller.
        vec![LedgerEvent::CompanyUpdated(Company {
            total_deliveries: existing.total_deliveries,
            ..company.clone()
        })]
    }

    fn handle_delete_company(&self, cmd: &DeleteCompany) -> Vec<LedgerEvent> {
        let deliveries_removed: Vec<DeliveryId> = self
            .deliveries
            .iter()
            .filter(|d| d.company_id == cmd.company_id)
            .map(|d| d.id)
            .collect();

        if self.company(cmd.company_id).is_none() && deliveries_removed.is_empty() {
            return Vec::new();
        }

        vec![LedgerEvent::CompanyDeleted(CompanyDeleted {
            company_id: cmd.company_id,
            deliveries_removed,
        })]
    }

    /// Recorded even when the company is unknown; such a delivery has no
    /// [`LedgerState::company_name`] but still counts toward earnings.
    fn handle_add_delivery(&self, cmd: &AddDelivery) -> Vec<LedgerEvent> {
        vec![LedgerEvent::DeliveryAdded(Delivery::new(
            DeliveryId::new(),
            cmd.company_id,
            cmd.deliveries,
            cmd.rate,
            cmd.date,
        ))]
    }

    fn handle_delete_delivery(&self, cmd: &DeleteDelivery) -> Vec<LedgerEvent> {
        self.delivery(cmd.delivery_id)
            .map(|d| vec![LedgerEvent::DeliveryDeleted(d.clone())])
            .unwrap_or_default()
    }

    fn handle_add_fuel_record(&self, cmd: &AddFuelRecord) -> Vec<LedgerEvent> {
        let efficiency = previous_fill_up(&self.fuel_records, cmd.odometer_km).and_then(|prev| {
            FuelEfficiency::between(prev.odometer_km, cmd.odometer_km, cmd.amount, self.settings.fuel_price)
        });

        vec![LedgerEvent::FuelRecordAdded(FuelRecord {
            id: FuelRecordId::new(),
            amount: cmd.amount,
            odometer_km: cmd.odometer_km,
            date: cmd.date,
            efficiency,
        })]
    }

    fn handle_delete_fuel_record(&self, cmd: &DeleteFuelRecord) -> Vec<LedgerEvent> {
        if self.fuel_record(cmd.fuel_record_id).is_none() {
            return Vec::new();
        }
        vec![LedgerEvent::FuelRecordDeleted(cmd.fuel_record_id)]
    }
}

/// Apply one command to a snapshot, producing the next snapshot.
///
/// A command that decides no events (unknown id, for instance) returns a
/// state equal to the input, version included.
pub fn reduce(state: &LedgerState, command: &LedgerCommand) -> LedgerState {
    let Ok(events) = state.handle(command);
    let mut next = state.clone();
    for event in &events {
        debug!(event_type = event.event_type(), "applying event");
        next.apply(event);
    }
    next
}
