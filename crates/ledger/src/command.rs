use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gigledger_core::{CompanyId, DeliveryId, FuelRecordId, Money};

use crate::company::{Color, Company};

/// Command: AddCompany.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCompany {
    pub name: String,
    pub rate: Money,
    #[serde(default)]
    pub color: Color,
}

/// Command: DeleteCompany (cascades to the company's deliveries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCompany {
    pub company_id: CompanyId,
}

/// Command: AddDelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDelivery {
    pub company_id: CompanyId,
    pub deliveries: u32,
    /// Rate snapshot to charge; normally the company's current rate.
    pub rate: Money,
    pub date: NaiveDate,
}

/// Command: DeleteDelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDelivery {
    pub delivery_id: DeliveryId,
}

/// Command: AddFuelRecord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFuelRecord {
    pub amount: Money,
    pub odometer_km: f64,
    pub date: NaiveDate,
}

/// Command: DeleteFuelRecord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFuelRecord {
    pub fuel_record_id: FuelRecordId,
}

/// The closed set of commands the ledger accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AddCompany(AddCompany),
    /// Replace the company with the same id (name, rate, color).
    UpdateCompany(Company),
    DeleteCompany(DeleteCompany),
    AddDelivery(AddDelivery),
    DeleteDelivery(DeleteDelivery),
    AddFuelRecord(AddFuelRecord),
    DeleteFuelRecord(DeleteFuelRecord),
    RecomputeTotals,
}

impl LedgerCommand {
    /// Short stable name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerCommand::AddCompany(_) => "add_company",
            LedgerCommand::UpdateCompany(_) => "update_company",
            LedgerCommand::DeleteCompany(_) => "delete_company",
            LedgerCommand::AddDelivery(_) => "add_delivery",
            LedgerCommand::DeleteDelivery(_) => "delete_delivery",
            LedgerCommand::AddFuelRecord(_) => "add_fuel_record",
            LedgerCommand::DeleteFuelRecord(_) => "delete_fuel_record",
            LedgerCommand::RecomputeTotals => "recompute_totals",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_deserialize_from_tagged_json() {
        let json = r##"{"AddCompany":{"name":"Loggi","rate":"9.50","color":"#10b981"}}"##;
        let cmd: LedgerCommand = serde_json::from_str(json).unwrap();
        match cmd {
            LedgerCommand::AddCompany(c) => {
                assert_eq!(c.name, "Loggi");
                assert_eq!(c.rate, Money::from_cents(950));
                assert_eq!(c.color.as_str(), "#10B981");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cmd: LedgerCommand = serde_json::from_str(r#""RecomputeTotals""#).unwrap();
        assert_eq!(cmd, LedgerCommand::RecomputeTotals);
    }

    #[test]
    fn missing_color_falls_back_to_default() {
        let json = r#"{"AddCompany":{"name":"Loggi","rate":9.5}}"#;
        let cmd: LedgerCommand = serde_json::from_str(json).unwrap();
        let LedgerCommand::AddCompany(c) = cmd else {
            panic!("expected AddCompany");
        };
        assert_eq!(c.color, Color::default());
    }

    #[test]
    fn invalid_color_is_rejected_at_parse_time() {
        let json = r#"{"AddCompany":{"name":"Loggi","rate":"9.50","color":"blue"}}"#;
        assert!(serde_json::from_str::<LedgerCommand>(json).is_err());
    }
}
